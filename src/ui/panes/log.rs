//! Action log pane rendering

use crate::converter::{Action, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

fn action_style(action: &Action) -> Style {
    match action {
        Action::Start => Style::default().fg(DEFAULT_THEME.comment),
        Action::PushOperand(_) => Style::default().fg(DEFAULT_THEME.operand),
        Action::PushOperator(_) => Style::default().fg(DEFAULT_THEME.operator),
        Action::OpenGroup | Action::CloseGroup => Style::default().fg(DEFAULT_THEME.paren),
        Action::Fold { .. } => Style::default().fg(DEFAULT_THEME.folded),
        Action::DiscardUnclosedParen => Style::default().fg(DEFAULT_THEME.error),
    }
}

/// Render the log of visited steps, newest last
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    steps: &[Step],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let last = steps.len().saturating_sub(1);
    let all_items: Vec<ListItem> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let mut style = action_style(&step.action);
            if i == last {
                style = style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3} ", i),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(step.action.to_string(), style),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
