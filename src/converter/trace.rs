//! Step history for stepping through a conversion
//!
//! A traced conversion records a [`Step`] after every stack action. Each step
//! owns a copy of both stacks, so any point of the conversion can be shown
//! without replaying it. [`History`] stores the steps under a memory budget
//! and [`Trace`] adds a cursor for moving backward and forward through them.

use super::errors::ConvertError;
use super::lexer::Token;
use std::fmt;

/// What the converter did to reach a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Initial state, both stacks empty
    Start,
    PushOperand(String),
    PushOperator(String),
    /// `(` pushed onto the operator stack
    OpenGroup,
    /// `)` consumed and its matching `(` popped
    CloseGroup,
    /// Two operands and one operator combined into a prefix sub-expression
    Fold {
        operator: String,
        left: String,
        right: String,
        result: String,
    },
    /// `(` left on the operator stack when the input ran out
    DiscardUnclosedParen,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => write!(f, "start"),
            Action::PushOperand(operand) => write!(f, "push operand {}", operand),
            Action::PushOperator(operator) => write!(f, "push operator {}", operator),
            Action::OpenGroup => write!(f, "open group ("),
            Action::CloseGroup => write!(f, "close group )"),
            Action::Fold {
                operator,
                left,
                right,
                result,
            } => write!(f, "fold {} [{}] [{}] → {}", operator, left, right, result),
            Action::DiscardUnclosedParen => write!(f, "discard unclosed ("),
        }
    }
}

/// One recorded point of a conversion
#[derive(Debug, Clone)]
pub struct Step {
    /// Index of the token being processed, `None` during the final flush
    pub token: Option<usize>,
    pub action: Action,
    /// Operator stack, bottom first
    pub operators: Vec<String>,
    /// Operand stack, bottom first
    pub operands: Vec<String>,
}

impl Step {
    /// Estimate the memory usage of this step in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough: string bytes plus a fixed cost per stack entry
        let entries = self.operators.len() + self.operands.len();
        let text: usize = self
            .operators
            .iter()
            .chain(self.operands.iter())
            .map(String::len)
            .sum();

        64 + entries * 24 + text
    }
}

/// Recorded steps of one conversion
#[derive(Debug)]
pub struct History {
    steps: Vec<Step>,
    max_memory: usize,
    current_memory: usize,
}

impl History {
    pub fn new(max_memory: usize) -> Self {
        History {
            steps: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a step to history
    pub fn push(&mut self, step: Step) -> Result<(), ConvertError> {
        let step_size = step.estimated_size();

        if self.current_memory + step_size > self.max_memory {
            return Err(ConvertError::TraceLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += step_size;
        self.steps.push(step);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

/// Why the cursor could not move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    AtStart,
    AtEnd,
    NoSteps,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::AtStart => write!(f, "Already at the first step"),
            NavigationError::AtEnd => write!(f, "No more steps (conversion finished)"),
            NavigationError::NoSteps => write!(f, "No steps recorded"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// A finished (or failed) traced conversion with a cursor into its history
#[derive(Debug)]
pub struct Trace {
    tokens: Vec<Token>,
    history: History,
    outcome: Result<String, ConvertError>,
    position: usize,
}

impl Trace {
    pub fn new(
        tokens: Vec<Token>,
        history: History,
        outcome: Result<String, ConvertError>,
    ) -> Self {
        Trace {
            tokens,
            history,
            outcome,
            position: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The converted expression, or the error that stopped the conversion
    pub fn outcome(&self) -> &Result<String, ConvertError> {
        &self.outcome
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_steps(&self) -> usize {
        self.history.len()
    }

    pub fn current(&self) -> Option<&Step> {
        self.history.get(self.position)
    }

    /// Steps up to and including the current one
    pub fn visited(&self) -> &[Step] {
        let end = (self.position + 1).min(self.history.len());
        &self.history.steps()[..end]
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.history.len()
    }

    pub fn step_forward(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoSteps);
        }
        if self.is_at_end() {
            return Err(NavigationError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoSteps);
        }
        if self.position == 0 {
            return Err(NavigationError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoSteps);
        }
        self.position = 0;
        Ok(())
    }

    pub fn jump_to_end(&mut self) -> Result<(), NavigationError> {
        if self.history.is_empty() {
            return Err(NavigationError::NoSteps);
        }
        self.position = self.history.len() - 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(action: Action, operands: &[&str]) -> Step {
        Step {
            token: None,
            action,
            operators: Vec::new(),
            operands: operands.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_history_limit() {
        let first = step(Action::Start, &[]);
        let size = first.estimated_size();
        let mut history = History::new(size + 10);

        assert!(history.push(first).is_ok());
        assert_eq!(history.memory_usage(), size);

        let result = history.push(step(Action::PushOperand("A".into()), &["A"]));
        assert_eq!(
            result,
            Err(ConvertError::TraceLimitExceeded {
                current: size,
                limit: size + 10,
            })
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_cursor_navigation() {
        let mut history = History::new(usize::MAX);
        history.push(step(Action::Start, &[])).unwrap();
        history.push(step(Action::PushOperand("A".into()), &["A"])).unwrap();
        history.push(step(Action::PushOperand("B".into()), &["A", "B"])).unwrap();

        let mut trace = Trace::new(Vec::new(), history, Ok("A".into()));
        assert_eq!(trace.step_backward(), Err(NavigationError::AtStart));

        trace.step_forward().unwrap();
        assert_eq!(trace.position(), 1);
        assert_eq!(trace.visited().len(), 2);

        trace.jump_to_end().unwrap();
        assert!(trace.is_at_end());
        assert_eq!(trace.step_forward(), Err(NavigationError::AtEnd));
        assert_eq!(trace.current().unwrap().operands, vec!["A", "B"]);

        trace.rewind_to_start().unwrap();
        assert_eq!(trace.current().unwrap().action, Action::Start);
    }

    #[test]
    fn test_empty_history() {
        let mut trace = Trace::new(Vec::new(), History::new(0), Err(ConvertError::EmptyExpression));

        assert!(trace.current().is_none());
        assert!(trace.visited().is_empty());
        assert_eq!(trace.step_forward(), Err(NavigationError::NoSteps));
        assert_eq!(trace.jump_to_end(), Err(NavigationError::NoSteps));
    }

    #[test]
    fn test_action_display() {
        let fold = Action::Fold {
            operator: "*".into(),
            left: "B".into(),
            right: "C".into(),
            result: "* B C".into(),
        };

        assert_eq!(fold.to_string(), "fold * [B] [C] → * B C");
        assert_eq!(Action::PushOperand("A".into()).to_string(), "push operand A");
    }
}
