//! Two-stack infix-to-prefix conversion
//!
//! Tokens are read left to right. Operands go straight onto the operand
//! stack; operators wait on the operator stack until an operator of lower or
//! equal rank, a `)`, or the end of input forces them out. Forcing an
//! operator out is a *fold*: the top two operands and the operator become one
//! prefix sub-expression that is pushed back as a single operand.
//!
//! Equal ranks fold the waiting operator first, so every operator groups to
//! the left, `^` included: `A ^ B ^ C` becomes `^ ^ A B C`.

use super::errors::ConvertError;
use super::lexer::{tokenize, Token};
use super::precedence::precedence;
use super::trace::{Action, History, Step, Trace};

/// Converter state for one conversion
pub struct Converter {
    operator_stack: Vec<Token>,
    operand_stack: Vec<String>,
    /// Present only when the conversion is being traced
    history: Option<History>,
    /// Index of the token being processed, for trace steps
    current_token: Option<usize>,
}

impl Converter {
    pub fn new() -> Self {
        Converter {
            operator_stack: Vec::new(),
            operand_stack: Vec::new(),
            history: None,
            current_token: None,
        }
    }

    /// Create a converter that records every stack action, up to
    /// `memory_limit` estimated bytes of history.
    pub fn with_history(memory_limit: usize) -> Self {
        Converter {
            history: Some(History::new(memory_limit)),
            ..Converter::new()
        }
    }

    /// Convert a token stream to a prefix expression
    pub fn convert(&mut self, tokens: &[Token]) -> Result<String, ConvertError> {
        self.operator_stack.clear();
        self.operand_stack.clear();
        self.current_token = None;
        self.record(Action::Start)?;

        for token in tokens {
            self.current_token = Some(token.location().index);

            match token {
                Token::Operand(name, _) => {
                    self.operand_stack.push(name.clone());
                    self.record(Action::PushOperand(name.clone()))?;
                }
                Token::LParen(_) => {
                    self.operator_stack.push(token.clone());
                    self.record(Action::OpenGroup)?;
                }
                Token::RParen(location) => {
                    loop {
                        match self.operator_stack.pop() {
                            Some(Token::LParen(_)) => break,
                            Some(operator) => self.fold(operator)?,
                            None => {
                                return Err(ConvertError::UnmatchedCloseParen {
                                    location: *location,
                                })
                            }
                        }
                    }
                    self.record(Action::CloseGroup)?;
                }
                Token::Operator(symbol, _) => {
                    let rank = precedence(symbol);
                    while self.should_fold_before(rank) {
                        if let Some(operator) = self.operator_stack.pop() {
                            self.fold(operator)?;
                        }
                    }
                    self.operator_stack.push(token.clone());
                    self.record(Action::PushOperator(symbol.clone()))?;
                }
            }
        }

        // Flush whatever is still waiting
        self.current_token = None;
        while let Some(operator) = self.operator_stack.pop() {
            if let Token::LParen(_) = operator {
                self.record(Action::DiscardUnclosedParen)?;
            } else {
                self.fold(operator)?;
            }
        }

        match self.operand_stack.len() {
            0 => Err(ConvertError::EmptyExpression),
            1 => Ok(self.operand_stack[0].clone()),
            count => Err(ConvertError::DanglingOperands { count }),
        }
    }

    /// Take the recorded history, if this converter was tracing
    pub fn into_history(self) -> Option<History> {
        self.history
    }

    /// Whether the operator on top of the stack must be folded before an
    /// operator of `rank` is pushed. `(` stops the search.
    fn should_fold_before(&self, rank: u8) -> bool {
        match self.operator_stack.last() {
            Some(Token::LParen(_)) | None => false,
            Some(top) => rank <= precedence(top.text()),
        }
    }

    /// Combine the top two operands under `operator`
    fn fold(&mut self, operator: Token) -> Result<(), ConvertError> {
        // First pop is the right-hand operand
        let (Some(right), Some(left)) = (self.operand_stack.pop(), self.operand_stack.pop()) else {
            return Err(ConvertError::MissingOperand {
                operator: operator.text().to_string(),
                location: operator.location(),
            });
        };

        let result = format!("{} {} {}", operator.text(), left, right);
        self.operand_stack.push(result.clone());
        self.record(Action::Fold {
            operator: operator.text().to_string(),
            left,
            right,
            result,
        })
    }

    fn record(&mut self, action: Action) -> Result<(), ConvertError> {
        let Some(history) = self.history.as_mut() else {
            return Ok(());
        };

        let step = Step {
            token: self.current_token,
            action,
            operators: self
                .operator_stack
                .iter()
                .map(|t| t.text().to_string())
                .collect(),
            operands: self.operand_stack.clone(),
        };
        history.push(step)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a whitespace-separated infix expression to prefix notation.
///
/// ```
/// use prefixtty::converter::infix_to_prefix;
///
/// assert_eq!(infix_to_prefix("A + B * C").unwrap(), "+ A * B C");
/// ```
pub fn infix_to_prefix(expression: &str) -> Result<String, ConvertError> {
    let tokens = tokenize(expression);
    Converter::new().convert(&tokens)
}

/// Convert `expression` while recording every step.
///
/// A failed conversion still returns its partial history; the error is kept
/// as the trace's outcome.
pub fn trace_conversion(expression: &str, memory_limit: usize) -> Trace {
    let tokens = tokenize(expression);
    let mut converter = Converter::with_history(memory_limit);
    let outcome = converter.convert(&tokens);
    let history = converter
        .into_history()
        .unwrap_or_else(|| History::new(memory_limit));

    Trace::new(tokens, history, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::lexer::SourceLocation;

    fn convert(expression: &str) -> Result<String, ConvertError> {
        infix_to_prefix(expression)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(convert("A + B * C").unwrap(), "+ A * B C");
        assert_eq!(convert("A * B + C").unwrap(), "+ * A B C");
        assert_eq!(convert("A + B ^ C * D").unwrap(), "+ A * ^ B C D");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(convert("( A + B ) * C").unwrap(), "* + A B C");
        assert_eq!(convert("A * ( B + C )").unwrap(), "* A + B C");
        assert_eq!(convert("( ( A ) )").unwrap(), "A");
        assert_eq!(
            convert("( A - B / C ) * ( D + E )").unwrap(),
            "* - A / B C + D E"
        );
    }

    #[test]
    fn test_left_grouping() {
        assert_eq!(convert("A - B - C").unwrap(), "- - A B C");
        assert_eq!(convert("A / B * C").unwrap(), "* / A B C");
        // Exponent groups left too
        assert_eq!(convert("A ^ B ^ C").unwrap(), "^ ^ A B C");
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(convert("A").unwrap(), "A");
        assert_eq!(convert("  42  ").unwrap(), "42");
    }

    #[test]
    fn test_unknown_operator_ranks_lowest() {
        // `%` ranks 0, so everything before it folds first
        assert_eq!(convert("A * B % C + D").unwrap(), "% * A B + C D");
        // `(` still shields its contents from a rank-0 operator
        assert_eq!(convert("( A % B ) % C").unwrap(), "% % A B C");
    }

    #[test]
    fn test_unclosed_paren_is_discarded() {
        assert_eq!(convert("( A + B").unwrap(), "+ A B");
        assert_eq!(convert("A * ( B + C").unwrap(), "* A + B C");
    }

    #[test]
    fn test_errors() {
        assert_eq!(convert(""), Err(ConvertError::EmptyExpression));
        assert_eq!(convert("( )"), Err(ConvertError::EmptyExpression));
        assert_eq!(
            convert("A +"),
            Err(ConvertError::MissingOperand {
                operator: "+".into(),
                location: SourceLocation::new(1, 3),
            })
        );
        assert_eq!(
            convert("A + B )"),
            Err(ConvertError::UnmatchedCloseParen {
                location: SourceLocation::new(3, 7),
            })
        );
        assert_eq!(
            convert("A B + C"),
            Err(ConvertError::DanglingOperands { count: 2 })
        );
    }

    #[test]
    fn test_converter_is_reusable() {
        let mut converter = Converter::new();
        assert!(converter.convert(&tokenize("A +")).is_err());
        assert_eq!(converter.convert(&tokenize("A + B")).unwrap(), "+ A B");
    }

    #[test]
    fn test_untraced_converter_has_no_history() {
        let mut converter = Converter::new();
        converter.convert(&tokenize("A")).unwrap();
        assert!(converter.into_history().is_none());
    }

    #[test]
    fn test_trace_records_each_action() {
        let trace = trace_conversion("A + B * C", usize::MAX);
        let actions: Vec<String> = trace
            .history()
            .steps()
            .iter()
            .map(|s| s.action.to_string())
            .collect();

        assert_eq!(
            actions,
            vec![
                "start",
                "push operand A",
                "push operator +",
                "push operand B",
                "push operator *",
                "push operand C",
                "fold * [B] [C] → * B C",
                "fold + [A] [* B C] → + A * B C",
            ]
        );
        assert_eq!(trace.outcome().as_deref(), Ok("+ A * B C"));

        let last = trace.history().get(trace.total_steps() - 1).unwrap();
        assert_eq!(last.token, None);
        assert!(last.operators.is_empty());
        assert_eq!(last.operands, vec!["+ A * B C"]);
    }

    #[test]
    fn test_trace_stack_snapshots() {
        let trace = trace_conversion("( A + B ) * C", usize::MAX);
        let steps = trace.history().steps();

        // After `+` is pushed inside the group
        assert_eq!(steps[3].operators, vec!["(", "+"]);
        assert_eq!(steps[3].token, Some(2));
        // `)` folds, then closes the group
        assert_eq!(steps[5].action.to_string(), "fold + [A] [B] → + A B");
        assert_eq!(steps[6].action, Action::CloseGroup);
        assert!(steps[6].operators.is_empty());
    }

    #[test]
    fn test_trace_keeps_partial_history() {
        let trace = trace_conversion("A + )", usize::MAX);

        assert!(matches!(
            trace.outcome(),
            Err(ConvertError::MissingOperand { .. })
        ));
        // start, push A, push +, then the failed fold
        assert_eq!(trace.total_steps(), 3);
    }

    #[test]
    fn test_trace_limit() {
        let trace = trace_conversion("A + B", 1);

        assert!(matches!(
            trace.outcome(),
            Err(ConvertError::TraceLimitExceeded { limit: 1, .. })
        ));
        assert!(trace.history().is_empty());
    }
}
