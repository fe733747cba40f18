// Constants for the converter and the stepping UI

/// Rank of `+` and `-`
pub const ADDITIVE_PRECEDENCE: u8 = 1;

/// Rank of `*` and `/`
pub const MULTIPLICATIVE_PRECEDENCE: u8 = 2;

/// Rank of `^`
pub const EXPONENT_PRECEDENCE: u8 = 3;

/// Rank given to any operator symbol missing from the precedence table
pub const UNKNOWN_PRECEDENCE: u8 = 0;

/// Default memory budget for a recorded conversion trace (16 MiB)
pub const DEFAULT_TRACE_LIMIT: usize = 16 * 1024 * 1024;

/// Delay between steps while the UI is auto-playing, in milliseconds
pub const AUTO_PLAY_INTERVAL_MS: u64 = 800;
