//! Dialog controller - lifecycle of one open dialog
//!
//! A controller is created open. It owns the presentation tree, the
//! keyboard listener (when one was requested) and the write side of the
//! outcome channel, and moves through
//!
//! ```text
//! Open ──close──▶ Closing ──transition end──▶ Closed   (animated)
//! Open ──close──────────────────────────────▶ Closed   (otherwise)
//! ```
//!
//! The outcome is settled by the first `close`; every later close request
//! is ignored. `Closed` is terminal.

use crate::action::Action;
use crate::component::Component;
use crate::config::{DialogConfig, DialogOptions};
use crate::error::DialogResult;
use crate::keyboard::KeyboardListener;
use crate::outcome::{self, CloseReason, Outcome, PendingOutcome, Resolver};
use crate::presentation::{class, Presentation, Propagation};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long the exit transition runs before the tree is removed
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Open,
    /// Exit transition running; the tree is still displayed
    Closing,
    Closed,
}

/// One-shot transition-end listener armed by an animated close
#[derive(Debug)]
struct TransitionEnd {
    armed_at: Instant,
}

/// Open a confirm dialog with default options
pub fn confirm(content: impl Into<String>) -> DialogResult<(DialogController, PendingOutcome)> {
    DialogController::open_with(DialogOptions::confirm(content))
}

/// Open an alert dialog with default options
pub fn alert(content: impl Into<String>) -> DialogResult<(DialogController, PendingOutcome)> {
    DialogController::open_with(DialogOptions::alert(content))
}

#[derive(Debug)]
pub struct DialogController {
    config: DialogConfig,
    state: Lifecycle,
    presentation: Option<Presentation>,
    keyboard: Option<KeyboardListener>,
    resolver: Resolver,
    transition_end: Option<TransitionEnd>,
}

impl DialogController {
    /// Validate a raw configuration record and open the dialog.
    ///
    /// Nothing is built and no outcome exists if validation fails.
    pub fn open(options: &Value) -> DialogResult<(Self, PendingOutcome)> {
        let config = DialogConfig::from_value(options)?;
        Ok(Self::mount(config))
    }

    pub fn open_with(options: DialogOptions) -> DialogResult<(Self, PendingOutcome)> {
        let config = DialogConfig::from_options(options)?;
        Ok(Self::mount(config))
    }

    fn mount(config: DialogConfig) -> (Self, PendingOutcome) {
        let (resolver, pending) = outcome::channel(&config);
        let presentation = Presentation::build(&config);
        let keyboard = config.wants_keyboard().then(KeyboardListener::register);

        debug!(
            mode = %config.mode(),
            animated = config.animated(),
            keyboard = keyboard.is_some(),
            "dialog opened"
        );

        let controller = Self {
            config,
            state: Lifecycle::Open,
            presentation: Some(presentation),
            keyboard,
            resolver,
            transition_end: None,
        };
        (controller, pending)
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    /// The displayed tree, if the dialog is still on screen
    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.presentation.is_some()
    }

    pub fn keyboard_registered(&self) -> bool {
        self.keyboard.is_some()
    }

    pub fn is_settled(&self) -> bool {
        self.resolver.is_settled()
    }

    /// Close with an explicit reason.
    ///
    /// Returns true for the call that settled the outcome, false for every
    /// call after it.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        self.close_at(reason, Instant::now())
    }

    /// Close without an explicit reason
    pub fn close_default(&mut self) -> bool {
        self.close(CloseReason::default())
    }

    fn close_at(&mut self, reason: CloseReason, now: Instant) -> bool {
        if self.state != Lifecycle::Open {
            return false;
        }

        debug!(reason = %reason, "dialog closing");
        if !self
            .resolver
            .resolve(Outcome::new(reason, self.config.clone()))
        {
            return false;
        }

        self.keyboard = None;

        let animated = self.config.animated();
        if let Some(presentation) = self.presentation.as_mut().filter(|_| animated) {
            presentation.add_container_class(class::TRANSITION_START);
            self.transition_end = Some(TransitionEnd { armed_at: now });
            self.state = Lifecycle::Closing;
        } else {
            self.unmount();
        }
        true
    }

    /// Fire the transition-end listener.
    ///
    /// Only an armed listener reacts, and it disarms itself, so the tree is
    /// removed exactly once.
    pub fn on_transition_end(&mut self) -> bool {
        if self.transition_end.take().is_none() {
            return false;
        }
        self.unmount();
        true
    }

    /// Run deferred work for the current frame.
    ///
    /// While open and animated, the first tick after the tree has been
    /// painted clears the entering state. While closing, the transition end
    /// fires once `TRANSITION_DURATION` has passed.
    pub fn on_tick(&mut self, now: Instant) {
        match self.state {
            Lifecycle::Open => {
                if !self.config.animated() {
                    return;
                }
                if let Some(presentation) = self.presentation.as_mut() {
                    if presentation.painted()
                        && presentation.container_has_class(class::TRANSITION_START)
                    {
                        presentation.remove_container_class(class::TRANSITION_START);
                        debug!("enter transition started");
                    }
                }
            }
            Lifecycle::Closing => {
                let elapsed = self
                    .transition_end
                    .as_ref()
                    .map(|t| now.saturating_duration_since(t.armed_at) >= TRANSITION_DURATION)
                    .unwrap_or(false);
                if elapsed {
                    self.on_transition_end();
                }
            }
            Lifecycle::Closed => {}
        }
    }

    /// Handle a key through the document-level listener, if registered.
    ///
    /// Returns true if the key closed the dialog.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_reason(key) {
            Some(reason) => self.close(reason),
            None => false,
        }
    }

    /// Handle a left click at a screen cell
    pub fn handle_click(&mut self, column: u16, row: u16) -> Propagation {
        match self.click_reason(column, row) {
            Some(reason) => {
                self.close(reason);
                Propagation::Stopped
            }
            None => Propagation::Continue,
        }
    }

    /// Lay out the tree for a screen without drawing it
    pub fn layout(&mut self, area: Rect) {
        if let Some(presentation) = self.presentation.as_mut() {
            presentation.layout(area);
        }
    }

    fn key_reason(&self, key: KeyEvent) -> Option<CloseReason> {
        if self.state != Lifecycle::Open {
            return None;
        }
        self.keyboard.as_ref().and_then(|listener| listener.handle(key))
    }

    fn click_reason(&self, column: u16, row: u16) -> Option<CloseReason> {
        if self.state != Lifecycle::Open {
            return None;
        }
        self.presentation
            .as_ref()
            .and_then(|presentation| presentation.dispatch_click(column, row).reason)
    }

    fn unmount(&mut self) {
        self.presentation = None;
        self.state = Lifecycle::Closed;
        debug!("dialog removed");
    }
}

impl Component for DialogController {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(self.key_reason(key).map(Action::CloseDialog))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        Ok(self
            .click_reason(mouse.column, mouse.row)
            .map(Action::CloseDialog))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::CloseDialog(reason) => {
                self.close(reason);
            }
            Action::Tick => self.on_tick(Instant::now()),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if let Some(presentation) = self.presentation.as_mut() {
            presentation.render(frame, area);
        }
        Ok(())
    }
}

impl Drop for DialogController {
    fn drop(&mut self) {
        if !self.resolver.is_settled() {
            warn!("dialog dropped while open, resolving with default reason");
            self.resolver.resolve(Outcome::new(
                CloseReason::DefaultClosed,
                self.config.clone(),
            ));
        }
    }
}
