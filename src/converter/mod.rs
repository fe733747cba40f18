//! Infix to prefix conversion
//!
//! - [`lexer`]: Tokenization (space-separated words → tokens)
//! - [`precedence`]: The fixed operator precedence table
//! - [`convert`]: The two-stack converter
//! - [`trace`]: Recorded steps of a conversion, for stepping through it
//! - [`errors`]: Conversion error type
//! - [`constants`]: Precedence ranks and default limits
//!
//! # Supported input
//!
//! - Operands: any purely alphanumeric word (`A`, `x1`, `42`)
//! - Operators: `+ - * / ^`; any other symbol is accepted as an operator
//!   of the lowest rank
//! - Parentheses `(` and `)`
//!
//! Every token must be separated from its neighbours by whitespace.

pub mod constants;
pub mod convert;
pub mod errors;
pub mod lexer;
pub mod precedence;
pub mod trace;

pub use convert::{infix_to_prefix, trace_conversion, Converter};
pub use errors::ConvertError;
pub use lexer::{tokenize, SourceLocation, Token};
pub use trace::{Action, History, NavigationError, Step, Trace};
