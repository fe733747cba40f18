//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tokens`]: The input token stream with the token being processed highlighted,
//!   plus the conversion outcome once the last step is reached
//! - [`stack`]: One of the two converter stacks, top entry first
//! - [`log`]: Every action taken up to the current step
//! - [`status`]: Status bar with keybindings and step counter
//!
//! Each pane module exports a primary `render_*` function taking the frame,
//! the target area and the data to draw. Panes hold no state of their own;
//! scroll offsets live in [`App`](crate::ui::App).

pub mod log;
pub mod stack;
pub mod status;
pub mod tokens;

pub use log::render_log_pane;
pub use stack::{render_stack_pane, StackKind};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::{render_token_pane, TokenRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by all bordered panes
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `offset` so that a list of `total` rows fills a pane of `visible` rows
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = usize::MAX;
        clamp_scroll(&mut offset, 10, 4);
        assert_eq!(offset, 6);

        let mut offset = 3;
        clamp_scroll(&mut offset, 2, 4);
        assert_eq!(offset, 0);

        let mut offset = 2;
        clamp_scroll(&mut offset, 10, 4);
        assert_eq!(offset, 2);
    }
}
