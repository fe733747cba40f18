//! Prefix expression evaluator
//!
//! Evaluates the output of the converter against a set of operand values, so
//! a conversion can be checked numerically. Operands are either runs of ASCII
//! digits (literals) or names looked up in [`Bindings`]; a bound name wins
//! over a literal of the same spelling.

pub mod errors;

pub use errors::EvalError;

use crate::converter::precedence::is_known_operator;
use rustc_hash::FxHashMap;

/// Operand name → value
pub type Bindings = FxHashMap<String, f64>;

/// Evaluate a prefix expression.
///
/// Words are scanned right to left onto a value stack, so nesting depth is
/// bounded only by memory.
///
/// ```
/// use prefixtty::eval::{evaluate, Bindings};
///
/// let mut bindings = Bindings::default();
/// bindings.insert("A".to_string(), 2.0);
/// assert_eq!(evaluate("+ A * 3 4", &bindings).unwrap(), 14.0);
/// ```
pub fn evaluate(prefix: &str, bindings: &Bindings) -> Result<f64, EvalError> {
    let words: Vec<&str> = prefix.split_whitespace().collect();
    // (value, index of the word that starts its sub-expression)
    let mut values: Vec<(f64, usize)> = Vec::new();

    for (index, word) in words.iter().copied().enumerate().rev() {
        if word.chars().all(char::is_alphanumeric) {
            values.push((operand_value(bindings, word, index)?, index));
            continue;
        }

        let apply = operator_fn(word, index)?;
        // Top of the stack is the sub-expression right after the operator
        let (Some((left, _)), Some((right, _))) = (values.pop(), values.pop()) else {
            return Err(EvalError::UnexpectedEnd);
        };

        if word == "/" && right == 0.0 {
            return Err(EvalError::DivisionByZero { index });
        }

        values.push((apply(left, right), index));
    }

    match values.as_slice() {
        [] => Err(EvalError::UnexpectedEnd),
        [(value, _)] => Ok(*value),
        [.., (_, next), _] => Err(EvalError::TrailingTokens {
            index: *next,
            token: words[*next].to_string(),
        }),
    }
}

/// Parse a `NAME=VALUE` command-line binding
pub fn parse_binding(binding: &str) -> Result<(String, f64), EvalError> {
    let invalid = || EvalError::InvalidBinding {
        binding: binding.to_string(),
    };

    let (name, value) = binding.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return Err(invalid());
    }
    let value: f64 = value.trim().parse().map_err(|_| invalid())?;

    Ok((name.to_string(), value))
}

fn operator_fn(word: &str, index: usize) -> Result<fn(f64, f64) -> f64, EvalError> {
    if !is_known_operator(word) {
        return Err(EvalError::UnknownOperator {
            index,
            symbol: word.to_string(),
        });
    }

    let apply: fn(f64, f64) -> f64 = match word {
        "+" => |a, b| a + b,
        "-" => |a, b| a - b,
        "*" => |a, b| a * b,
        "/" => |a, b| a / b,
        _ => f64::powf,
    };
    Ok(apply)
}

fn operand_value(bindings: &Bindings, word: &str, index: usize) -> Result<f64, EvalError> {
    if let Some(value) = bindings.get(word) {
        return Ok(*value);
    }

    if word.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(value) = word.parse::<f64>() {
            return Ok(value);
        }
    }

    Err(EvalError::UnboundOperand {
        index,
        name: word.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> Bindings {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_literals_and_names() {
        let env = bindings(&[("A", 2.0), ("B", 5.0)]);

        assert_eq!(evaluate("7", &env).unwrap(), 7.0);
        assert_eq!(evaluate("- A B", &env).unwrap(), -3.0);
        assert_eq!(evaluate("^ A 10", &env).unwrap(), 1024.0);
        assert_eq!(evaluate("/ * B 3 A", &env).unwrap(), 7.5);
    }

    #[test]
    fn test_binding_shadows_literal() {
        let env = bindings(&[("10", 3.0)]);
        assert_eq!(evaluate("+ 10 1", &env).unwrap(), 4.0);
    }

    #[test]
    fn test_errors() {
        let env = Bindings::default();

        assert_eq!(evaluate("", &env), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("+ 1", &env), Err(EvalError::UnexpectedEnd));
        assert_eq!(
            evaluate("+ 1 2 3", &env),
            Err(EvalError::TrailingTokens {
                index: 3,
                token: "3".into()
            })
        );
        assert_eq!(
            evaluate("* x 2", &env),
            Err(EvalError::UnboundOperand {
                index: 1,
                name: "x".into()
            })
        );
        assert_eq!(
            evaluate("% 1 2", &env),
            Err(EvalError::UnknownOperator {
                index: 0,
                symbol: "%".into()
            })
        );
        assert_eq!(
            evaluate("/ 1 - 2 2", &env),
            Err(EvalError::DivisionByZero { index: 0 })
        );
        assert_eq!(evaluate("1 +", &env), Err(EvalError::UnexpectedEnd));
        assert_eq!(
            evaluate("1 2", &env),
            Err(EvalError::TrailingTokens {
                index: 1,
                token: "2".into()
            })
        );
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 200_000;
        let prefix = "+ ".repeat(depth) + &"1 ".repeat(depth + 1);

        let value = evaluate(&prefix, &Bindings::default()).unwrap();
        assert_eq!(value, (depth + 1) as f64);
    }

    #[test]
    fn test_parse_binding() {
        assert_eq!(parse_binding("A=1.5").unwrap(), ("A".to_string(), 1.5));
        assert_eq!(parse_binding(" x1 = -2 ").unwrap(), ("x1".to_string(), -2.0));
        assert!(parse_binding("A").is_err());
        assert!(parse_binding("=3").is_err());
        assert!(parse_binding("a_b=3").is_err());
        assert!(parse_binding("A=three").is_err());
    }
}
