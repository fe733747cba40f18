//! Stack pane rendering
//!
//! Draws one converter stack with the top entry first. Operand entries that
//! contain a space are folded prefix sub-expressions and get their own color.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Which converter stack a pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Operators,
    Operands,
}

impl StackKind {
    fn title(self) -> &'static str {
        match self {
            StackKind::Operators => " Operator Stack ",
            StackKind::Operands => " Operand Stack ",
        }
    }

    fn entry_style(self, entry: &str) -> Style {
        match self {
            StackKind::Operators if entry == "(" => Style::default().fg(DEFAULT_THEME.paren),
            StackKind::Operators => Style::default().fg(DEFAULT_THEME.operator),
            StackKind::Operands if entry.contains(' ') => Style::default().fg(DEFAULT_THEME.folded),
            StackKind::Operands => Style::default().fg(DEFAULT_THEME.operand),
        }
    }
}

/// Render a stack pane. `entries` is bottom first, as the converter stores it.
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    kind: StackKind,
    entries: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(kind.title())
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let mut all_items = Vec::new();

    if entries.is_empty() {
        all_items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    } else {
        for (depth, entry) in entries.iter().rev().enumerate() {
            let marker = if depth == 0 {
                Span::styled(
                    "▸ top ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(
                    format!("  [{}] ", entries.len() - 1 - depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                )
            };
            let line = Line::from(vec![
                marker,
                Span::styled(entry.as_str(), kind.entry_style(entry)),
            ]);
            all_items.push(ListItem::new(line));
        }
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
