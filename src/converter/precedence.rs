//! Operator precedence table
//!
//! The table is built once, on first use, and never mutated afterwards.
//! Symbols missing from it rank [`UNKNOWN_PRECEDENCE`].

use super::constants::{
    ADDITIVE_PRECEDENCE, EXPONENT_PRECEDENCE, MULTIPLICATIVE_PRECEDENCE, UNKNOWN_PRECEDENCE,
};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

static PRECEDENCE_TABLE: LazyLock<FxHashMap<&'static str, u8>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    table.insert("+", ADDITIVE_PRECEDENCE);
    table.insert("-", ADDITIVE_PRECEDENCE);
    table.insert("*", MULTIPLICATIVE_PRECEDENCE);
    table.insert("/", MULTIPLICATIVE_PRECEDENCE);
    table.insert("^", EXPONENT_PRECEDENCE);
    table
});

/// Rank of an operator symbol; higher binds tighter.
pub fn precedence(symbol: &str) -> u8 {
    PRECEDENCE_TABLE
        .get(symbol)
        .copied()
        .unwrap_or(UNKNOWN_PRECEDENCE)
}

/// Whether `symbol` is one of the five operators with a defined rank
pub fn is_known_operator(symbol: &str) -> bool {
    PRECEDENCE_TABLE.contains_key(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ranks() {
        assert_eq!(precedence("+"), 1);
        assert_eq!(precedence("-"), 1);
        assert_eq!(precedence("*"), 2);
        assert_eq!(precedence("/"), 2);
        assert_eq!(precedence("^"), 3);
    }

    #[test]
    fn test_unknown_symbols_fall_back() {
        assert_eq!(precedence("%"), UNKNOWN_PRECEDENCE);
        assert_eq!(precedence("("), UNKNOWN_PRECEDENCE);
        assert_eq!(precedence("**"), UNKNOWN_PRECEDENCE);
        assert!(!is_known_operator("%"));
        assert!(is_known_operator("^"));
    }
}
