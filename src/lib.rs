//! dialog-overlay - alert and confirm dialogs for ratatui
//!
//! A dialog is opened with [`alert`], [`confirm`] or
//! [`DialogController::open`], which hand back the controller and a
//! [`PendingOutcome`]. The host routes terminal events and ticks to the
//! controller (it implements [`Component`]) and draws it on top of its own
//! screen. The pending outcome settles exactly once, with the reason the
//! dialog closed.
//!
//! Only one dialog should be open at a time: a dialog with Escape or Enter
//! handling owns the process-wide keyboard listener while it is open.

pub mod action;
pub mod component;
pub mod config;
pub mod controller;
pub mod error;
pub mod keyboard;
pub mod layout;
pub mod outcome;
pub mod presentation;
pub mod settings;

pub use action::Action;
pub use component::Component;
pub use config::{DialogConfig, DialogOptions, Mode};
pub use controller::{alert, confirm, DialogController, Lifecycle};
pub use error::{DialogError, DialogResult};
pub use outcome::{CloseReason, Outcome, PendingOutcome};
pub use presentation::{class, Presentation, Propagation};
pub use settings::Settings;
