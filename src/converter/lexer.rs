//! Lexer (tokenizer) for infix expressions
//!
//! Input is expected to be fully space-tokenized: every operand, operator and
//! parenthesis is its own whitespace-separated word. The lexer never fails;
//! any word that is neither alphanumeric nor a parenthesis becomes an
//! [`Token::Operator`] and is ranked by the precedence table later on.

use std::fmt;

/// Where a token sits in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    /// Zero-based position in the token stream
    pub index: usize,
    /// One-based character column of the token's first character
    pub column: usize,
}

impl SourceLocation {
    pub fn new(index: usize, column: usize) -> Self {
        SourceLocation { index, column }
    }
}

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that conversion errors can
/// point at the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Operand(String, SourceLocation),
    Operator(String, SourceLocation),
    LParen(SourceLocation), // (
    RParen(SourceLocation), // )
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Operand(_, loc)
            | Token::Operator(_, loc)
            | Token::LParen(loc)
            | Token::RParen(loc) => *loc,
        }
    }

    /// The token's text as it appeared in the input
    pub fn text(&self) -> &str {
        match self {
            Token::Operand(s, _) | Token::Operator(s, _) => s,
            Token::LParen(_) => "(",
            Token::RParen(_) => ")",
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Operand(..))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Split `input` on whitespace and classify each word.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word_start: Option<(usize, usize)> = None; // (byte offset, column)
    let mut column = 0;

    for (offset, c) in input.char_indices() {
        column += 1;
        if c.is_whitespace() {
            if let Some((start, start_column)) = word_start.take() {
                let location = SourceLocation::new(tokens.len(), start_column);
                tokens.push(classify(&input[start..offset], location));
            }
        } else if word_start.is_none() {
            word_start = Some((offset, column));
        }
    }

    if let Some((start, start_column)) = word_start {
        let location = SourceLocation::new(tokens.len(), start_column);
        tokens.push(classify(&input[start..], location));
    }

    tokens
}

fn classify(word: &str, location: SourceLocation) -> Token {
    match word {
        "(" => Token::LParen(location),
        ")" => Token::RParen(location),
        _ if word.chars().all(char::is_alphanumeric) => {
            Token::Operand(word.to_string(), location)
        }
        _ => Token::Operator(word.to_string(), location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("( A + B ) * C");

        assert!(matches!(tokens[0], Token::LParen(_)));
        assert!(matches!(tokens[1], Token::Operand(ref s, _) if s == "A"));
        assert!(matches!(tokens[2], Token::Operator(ref s, _) if s == "+"));
        assert!(matches!(tokens[3], Token::Operand(ref s, _) if s == "B"));
        assert!(matches!(tokens[4], Token::RParen(_)));
        assert!(matches!(tokens[5], Token::Operator(ref s, _) if s == "*"));
        assert!(matches!(tokens[6], Token::Operand(ref s, _) if s == "C"));
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_locations() {
        let tokens = tokenize("  ab   +\tc12");

        assert_eq!(tokens[0].location(), SourceLocation::new(0, 3));
        assert_eq!(tokens[1].location(), SourceLocation::new(1, 8));
        assert_eq!(tokens[2].location(), SourceLocation::new(2, 10));
    }

    #[test]
    fn test_unknown_symbols_are_operators() {
        let tokens = tokenize("A % B 1.5 x_y");

        assert!(matches!(tokens[1], Token::Operator(ref s, _) if s == "%"));
        // Not purely alphanumeric, so neither is an operand
        assert!(matches!(tokens[3], Token::Operator(ref s, _) if s == "1.5"));
        assert!(matches!(tokens[4], Token::Operator(ref s, _) if s == "x_y"));
    }

    #[test]
    fn test_unicode_operands() {
        let tokens = tokenize("αβ + 42");

        assert!(tokens[0].is_operand());
        assert!(tokens[2].is_operand());
        assert_eq!(tokens[2].location().column, 6);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }
}
