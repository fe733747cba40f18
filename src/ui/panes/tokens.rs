//! Token stream pane
//!
//! Shows the input as the converter sees it. Tokens already consumed are drawn
//! normally, the token being processed is highlighted and the rest are dimmed.
//! Once the cursor reaches the last step, a second line shows the result or
//! the error that stopped the conversion.

use crate::converter::{ConvertError, Token};
use crate::eval::EvalError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Data needed to render the token pane
pub struct TokenRenderData<'a> {
    pub tokens: &'a [Token],
    /// Token being processed at the current step
    pub current_token: Option<usize>,
    /// Input fully consumed, remaining operators being flushed
    pub flushing: bool,
    pub outcome: Option<&'a Result<String, ConvertError>>,
    pub evaluation: Option<&'a Result<f64, EvalError>>,
}

fn token_style(token: &Token) -> Style {
    match token {
        Token::Operand(..) => Style::default().fg(DEFAULT_THEME.operand),
        Token::Operator(..) => Style::default().fg(DEFAULT_THEME.operator),
        Token::LParen(_) | Token::RParen(_) => Style::default().fg(DEFAULT_THEME.paren),
    }
}

/// Render the token pane
pub fn render_token_pane(frame: &mut Frame, area: Rect, data: TokenRenderData) {
    let block = Block::default()
        .title(" Infix Tokens ")
        .borders(Borders::ALL)
        .border_style(super::border_style(false))
        .padding(Padding::new(1, 1, 0, 0));

    let mut spans = Vec::new();
    for (i, token) in data.tokens.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }

        let consumed = data.flushing || data.current_token.is_some_and(|c| i < c);
        let style = if data.current_token == Some(i) {
            token_style(token)
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if consumed {
            token_style(token)
        } else {
            Style::default().fg(DEFAULT_THEME.comment)
        };
        spans.push(Span::styled(token.text(), style));
    }

    if data.tokens.is_empty() {
        spans.push(Span::styled(
            "(no tokens)",
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let mut lines = vec![Line::from(spans)];

    match data.outcome {
        Some(Ok(prefix)) => {
            let mut outcome = vec![
                Span::styled("Prefix: ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    prefix.as_str(),
                    Style::default()
                        .fg(DEFAULT_THEME.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ];
            match data.evaluation {
                Some(Ok(value)) => {
                    outcome.push(Span::styled("  = ", Style::default().fg(DEFAULT_THEME.comment)));
                    outcome.push(Span::styled(
                        value.to_string(),
                        Style::default().fg(DEFAULT_THEME.secondary),
                    ));
                }
                Some(Err(e)) => {
                    outcome.push(Span::styled(
                        format!("  ({})", e),
                        Style::default().fg(DEFAULT_THEME.error),
                    ));
                }
                None => {}
            }
            lines.push(Line::from(outcome));
        }
        Some(Err(e)) => {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", e),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        None if data.flushing => {
            lines.push(Line::from(Span::styled(
                "Input consumed, flushing operators",
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
