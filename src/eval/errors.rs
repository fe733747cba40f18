// Evaluation error types

use std::fmt;

/// Errors that can occur while evaluating a prefix expression.
///
/// `index` is the zero-based position of the offending word.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// An operator ran out of operands
    UnexpectedEnd,

    /// A complete expression was followed by more words
    TrailingTokens { index: usize, token: String },

    /// Operand name with no value bound to it
    UnboundOperand { index: usize, name: String },

    /// Symbol outside `+ - * / ^`
    UnknownOperator { index: usize, symbol: String },

    DivisionByZero { index: usize },

    /// `NAME=VALUE` binding that could not be parsed
    InvalidBinding { binding: String },
}

impl EvalError {
    pub fn index(&self) -> Option<usize> {
        match self {
            EvalError::TrailingTokens { index, .. }
            | EvalError::UnboundOperand { index, .. }
            | EvalError::UnknownOperator { index, .. }
            | EvalError::DivisionByZero { index } => Some(*index),
            EvalError::UnexpectedEnd | EvalError::InvalidBinding { .. } => None,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnexpectedEnd => {
                write!(f, "Expression ended while an operand was expected")
            }
            EvalError::TrailingTokens { index, token } => {
                write!(
                    f,
                    "Unexpected '{}' after complete expression (word {})",
                    token,
                    index + 1
                )
            }
            EvalError::UnboundOperand { index, name } => {
                write!(f, "No value bound to '{}' (word {})", name, index + 1)
            }
            EvalError::UnknownOperator { index, symbol } => {
                write!(f, "Cannot evaluate operator '{}' (word {})", symbol, index + 1)
            }
            EvalError::DivisionByZero { index } => {
                write!(f, "Division by zero (word {})", index + 1)
            }
            EvalError::InvalidBinding { binding } => {
                write!(f, "Invalid binding '{}': expected NAME=VALUE", binding)
            }
        }
    }
}

impl std::error::Error for EvalError {}
