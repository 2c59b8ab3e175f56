//! Error types for dialog construction

use thiserror::Error;

/// Errors raised while building a dialog
///
/// Construction is the only fallible step. Once a dialog is open every
/// user action leads to exactly one outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type DialogResult<T> = Result<T, DialogError>;

pub(crate) fn invalid(message: impl Into<String>) -> DialogError {
    DialogError::InvalidConfiguration(message.into())
}
