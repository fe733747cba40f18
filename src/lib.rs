//! # Introduction
//!
//! prefixtty converts space-separated infix arithmetic expressions to prefix
//! (Polish) notation with a two-stack shunting-yard pass, and can record every
//! stack action of a conversion so it can be stepped through in a terminal UI
//! built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Lexer → Converter → Prefix string
//!                     └──→ Trace → TUI
//! ```
//!
//! 1. [`converter`]: tokenises the input, runs the conversion and optionally
//!    records a [`converter::Trace`] of both stacks after every action.
//! 2. [`eval`]: evaluates a prefix expression against operand bindings, used
//!    to check a conversion numerically.
//! 3. [`ui`]: ratatui-based stepping view; not part of the stable library API.
//!
//! ## Supported input
//!
//! Operands are alphanumeric words, operators are `+ - * / ^` (ranked 1, 1,
//! 2, 2, 3) and parentheses group. Equal ranks group to the left, `^`
//! included.

pub mod converter;
pub mod eval;
pub mod ui;
