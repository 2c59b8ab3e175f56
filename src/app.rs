//! Root application component
//!
//! Draws the page behind the dialog and owns at most one open dialog. While
//! a dialog is up it receives every key; clicks go to the dialog first and
//! reach the page only when the dialog lets them through.

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dialog_overlay::{
    Action, Component, DialogController, Lifecycle, Mode, Outcome, PendingOutcome, Settings,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{error, info};

const ALERT_CONTENT: &str = "Changes saved to disk.";
const CONFIRM_CONTENT: &str = "Discard unsaved changes?\nThis cannot be undone.";

pub struct App {
    settings: Settings,
    dialog: Option<DialogController>,
    pending: Option<PendingOutcome>,
    last_outcome: Option<(Outcome, DateTime<Local>)>,
    /// Clicks that propagated past the dialog to the page
    page_clicks: usize,
    pub should_quit: bool,
    pub error: Option<String>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dialog: None,
            pending: None,
            last_outcome: None,
            page_clicks: 0,
            should_quit: false,
            error: None,
        }
    }

    fn open(&mut self, mode: Mode) {
        if self.dialog.is_some() {
            return;
        }

        let content = match mode {
            Mode::Alert => ALERT_CONTENT,
            Mode::Confirm => CONFIRM_CONTENT,
        };
        match DialogController::open_with(self.settings.dialog_options(mode, content)) {
            Ok((dialog, pending)) => {
                self.dialog = Some(dialog);
                self.pending = Some(pending);
                self.error = None;
            }
            Err(e) => {
                error!("could not open dialog: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    /// Pick up a settled outcome and drop the dialog once it is gone
    fn collect_outcome(&mut self) {
        if let Some(outcome) = self.pending.as_mut().and_then(|p| p.try_take()) {
            info!(
                reason = %outcome.reason,
                mode = %outcome.config.mode(),
                "dialog resolved"
            );
            self.last_outcome = Some((outcome, Local::now()));
            self.pending = None;
        }

        if self
            .dialog
            .as_ref()
            .is_some_and(|dialog| dialog.state() == Lifecycle::Closed)
        {
            self.dialog = None;
        }
    }

    fn outcome_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        match &self.last_outcome {
            Some((outcome, at)) => {
                lines.push(Line::from(vec![
                    Span::raw("  Last outcome: "),
                    Span::styled(
                        outcome.reason.to_string(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(
                            "  ({} dialog, {})",
                            outcome.config.mode(),
                            at.format("%H:%M:%S")
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            None => lines.push(Line::from(Span::styled(
                "  No dialog has been answered yet",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        lines.push(Line::from(format!(
            "  Clicks that reached the page: {}",
            self.page_clicks
        )));

        if let Some(error) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        lines
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(dialog) = self.dialog.as_mut() {
            return dialog.handle_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char('a') => Some(Action::OpenAlert),
            KeyCode::Char('c') => Some(Action::OpenConfirm),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::ForceQuit),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if let Some(dialog) = self.dialog.as_mut() {
            if let Some(action) = dialog.handle_mouse_event(mouse)? {
                return Ok(Some(action));
            }
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            return Ok(Some(Action::PageClicked));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::CloseDialog(_) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.update(action)?;
                }
            }
            Action::OpenAlert => self.open(Mode::Alert),
            Action::OpenConfirm => self.open(Mode::Confirm),
            Action::PageClicked => self.page_clicks += 1,
            Action::ForceQuit => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.close_default();
                }
                self.should_quit = true;
            }
            Action::Resize(..) => {}
        }

        self.collect_outcome();
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(Span::styled(
            "dialog-overlay",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        frame.render_widget(
            Paragraph::new(self.outcome_lines()).block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );

        let key_style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" a ", key_style),
            Span::raw("alert  "),
            Span::styled(" c ", key_style),
            Span::raw("confirm  "),
            Span::styled(
                " q ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        if let Some(dialog) = self.dialog.as_mut() {
            dialog.draw(frame, area)?;
        }
        Ok(())
    }
}
