//! Main TUI application state and logic

use crate::converter::constants::AUTO_PLAY_INTERVAL_MS;
use crate::converter::Trace;
use crate::eval::EvalError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Operators,
    Operands,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (operators -> operands -> log)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Operators => FocusedPane::Operands,
            FocusedPane::Operands => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Operators,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded conversion being stepped through
    pub trace: Trace,

    /// Value of the converted expression, when operand bindings were given
    pub evaluation: Option<Result<f64, EvalError>>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub operator_scroll: usize,
    pub operand_scroll: usize,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(trace: Trace, evaluation: Option<Result<f64, EvalError>>) -> Self {
        App {
            trace,
            evaluation,
            focused_pane: FocusedPane::Log,
            operator_scroll: 0,
            operand_scroll: 0,
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing
                && self.last_play_time.elapsed() >= Duration::from_millis(AUTO_PLAY_INTERVAL_MS)
            {
                if self.trace.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.log_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Poll with a timeout so auto-play keeps ticking
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Tokens on top, stacks in the middle, log below, status bar last
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Percentage(55),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let stack_columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[1]);

        let step = self.trace.current();
        let at_end = self.trace.is_at_end();

        super::panes::render_token_pane(
            frame,
            rows[0],
            super::panes::TokenRenderData {
                tokens: self.trace.tokens(),
                current_token: step.and_then(|s| s.token),
                flushing: step.is_some_and(|s| s.token.is_none() && self.trace.position() > 0),
                outcome: at_end.then(|| self.trace.outcome()),
                evaluation: if at_end { self.evaluation.as_ref() } else { None },
            },
        );

        let empty: &[String] = &[];
        super::panes::render_stack_pane(
            frame,
            stack_columns[0],
            super::panes::StackKind::Operators,
            step.map_or(empty, |s| s.operators.as_slice()),
            self.focused_pane == FocusedPane::Operators,
            &mut self.operator_scroll,
        );

        super::panes::render_stack_pane(
            frame,
            stack_columns[1],
            super::panes::StackKind::Operands,
            step.map_or(empty, |s| s.operands.as_slice()),
            self.focused_pane == FocusedPane::Operands,
            &mut self.operand_scroll,
        );

        super::panes::render_log_pane(
            frame,
            rows[2],
            self.trace.visited(),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_status_bar(
            frame,
            rows[3],
            super::panes::StatusRenderData {
                message: &self.status_message,
                current_step: self.trace.position(),
                total_steps: self.trace.total_steps(),
                failed: self.trace.outcome().is_err(),
                is_playing: self.is_playing,
                trace_memory: self.trace.history().memory_usage(),
                trace_limit: self.trace.history().memory_limit(),
            },
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if self.trace.step_forward().is_err() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.log_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_millis(AUTO_PLAY_INTERVAL_MS))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.status_message = match self.trace.jump_to_end() {
                    Ok(()) => "Jumped to end".to_string(),
                    Err(e) => e.to_string(),
                };
                self.log_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.status_message = match self.trace.rewind_to_start() {
                    Ok(()) => "Jumped to start".to_string(),
                    Err(e) => e.to_string(),
                };
                self.log_scroll = 0;
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Operators => &mut self.operator_scroll,
            FocusedPane::Operands => &mut self.operand_scroll,
            FocusedPane::Log => &mut self.log_scroll,
        }
    }

    fn step_forward(&mut self) {
        match self.trace.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                self.log_scroll = usize::MAX;
            }
            Err(e) => {
                self.status_message = format!("Cannot step forward: {}", e);
            }
        }
    }

    fn step_backward(&mut self) {
        match self.trace.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.log_scroll = usize::MAX;
            }
            Err(e) => {
                self.status_message = format!("Cannot step backward: {}", e);
            }
        }
    }
}
