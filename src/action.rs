//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the host processes
//! them to update state.

use crate::outcome::CloseReason;
use std::fmt;

/// All possible actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Regular tick; drives deferred transition callbacks
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the host application
    ForceQuit,
    /// Open an alert dialog
    OpenAlert,
    /// Open a confirm dialog
    OpenConfirm,
    /// Close the open dialog with the given reason
    CloseDialog(CloseReason),
    /// A click reached the page behind the dialog
    PageClicked,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::OpenAlert => write!(f, "OpenAlert"),
            Action::OpenConfirm => write!(f, "OpenConfirm"),
            Action::CloseDialog(reason) => write!(f, "CloseDialog({})", reason),
            Action::PageClicked => write!(f, "PageClicked"),
        }
    }
}
