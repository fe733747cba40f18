//! Conversion error types
//!
//! Every stack pop the converter performs is checked. Malformed input ends the
//! conversion with a [`ConvertError`] instead of a panic.

use super::lexer::SourceLocation;
use std::fmt;

/// Errors that can occur while converting an infix expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The input contained no tokens
    EmptyExpression,

    /// A fold needed two operands but the operand stack held fewer
    MissingOperand {
        operator: String,
        location: SourceLocation,
    },

    /// `)` with no matching `(` on the operator stack
    UnmatchedCloseParen { location: SourceLocation },

    /// More than one operand was left once every operator had been folded
    DanglingOperands { count: usize },

    /// Recording the conversion trace exceeded its memory budget
    TraceLimitExceeded { current: usize, limit: usize },
}

impl ConvertError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ConvertError::MissingOperand { location, .. } => Some(location),
            ConvertError::UnmatchedCloseParen { location } => Some(location),
            ConvertError::EmptyExpression
            | ConvertError::DanglingOperands { .. }
            | ConvertError::TraceLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::EmptyExpression => write!(f, "Empty expression"),
            ConvertError::MissingOperand { operator, location } => {
                write!(
                    f,
                    "Operator '{}' at column {} is missing an operand",
                    operator, location.column
                )
            }
            ConvertError::UnmatchedCloseParen { location } => {
                write!(f, "Unmatched ')' at column {}", location.column)
            }
            ConvertError::DanglingOperands { count } => {
                write!(
                    f,
                    "Expression left {} operands without an operator to join them",
                    count
                )
            }
            ConvertError::TraceLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Trace memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}
