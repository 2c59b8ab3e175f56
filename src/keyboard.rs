//! Document-level keyboard listener
//!
//! A dialog that wants Escape or Enter handling registers one listener for
//! as long as it is open. The registration is process-wide: the host routes
//! key events to the dialog regardless of focus, so only one dialog may hold
//! a listener at a time. Running two dialogs concurrently is unsupported.

use crate::outcome::CloseReason;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

static ACTIVE_LISTENERS: AtomicUsize = AtomicUsize::new(0);

/// Number of keyboard listeners currently registered
pub fn active_listeners() -> usize {
    ACTIVE_LISTENERS.load(Ordering::SeqCst)
}

/// Registration guard; dropping it releases the listener
#[derive(Debug)]
pub struct KeyboardListener {
    _registration: (),
}

impl KeyboardListener {
    pub fn register() -> Self {
        let previous = ACTIVE_LISTENERS.fetch_add(1, Ordering::SeqCst);
        if previous > 0 {
            warn!(
                active = previous + 1,
                "keyboard listener registered while another dialog holds one"
            );
        }
        debug!("keyboard listener registered");
        Self { _registration: () }
    }

    /// Map a key to a close reason.
    ///
    /// Both keys are served once registered, whichever of `escCloses` /
    /// `enterConfirms` asked for the registration.
    pub fn handle(&self, key: KeyEvent) -> Option<CloseReason> {
        match key.code {
            KeyCode::Esc => Some(CloseReason::EscapeClosed),
            KeyCode::Enter => Some(CloseReason::EnterConfirmed),
            _ => None,
        }
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        ACTIVE_LISTENERS.fetch_sub(1, Ordering::SeqCst);
        debug!("keyboard listener released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_key_mapping() {
        let listener = KeyboardListener::register();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(listener.handle(key(KeyCode::Esc)), Some(CloseReason::EscapeClosed));
        assert_eq!(
            listener.handle(key(KeyCode::Enter)),
            Some(CloseReason::EnterConfirmed)
        );
        assert_eq!(listener.handle(key(KeyCode::Char('y'))), None);
        assert_eq!(listener.handle(key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_registration_is_counted() {
        let listener = KeyboardListener::register();
        assert!(active_listeners() >= 1);
        drop(listener);
    }
}
