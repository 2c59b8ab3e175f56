//! Dialog outcomes and the single-assignment result channel
//!
//! Every dialog resolves exactly once. The controller holds a [`Resolver`]
//! and the caller holds a [`PendingOutcome`]; the first settlement wins and
//! every later one is dropped on the floor.

use crate::config::DialogConfig;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Why a dialog closed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CloseReason {
    /// The confirm control was clicked; carries its label
    Confirmed { label: String },
    /// The cancel control was clicked; carries its label
    Cancelled { label: String },
    /// Escape was pressed
    EscapeClosed,
    /// Enter was pressed
    EnterConfirmed,
    /// The overlay background was clicked
    OverlayDismissed,
    /// Closed without an explicit reason
    #[default]
    DefaultClosed,
}

impl CloseReason {
    /// Reason string: the control label for clicks, a fixed tag otherwise
    pub fn as_str(&self) -> &str {
        match self {
            CloseReason::Confirmed { label } | CloseReason::Cancelled { label } => label,
            CloseReason::EscapeClosed => "esc",
            CloseReason::EnterConfirmed => "enter",
            CloseReason::OverlayDismissed => "overlay",
            CloseReason::DefaultClosed => "close",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal resolution of one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reason: CloseReason,
    pub config: DialogConfig,
}

impl Outcome {
    pub fn new(reason: CloseReason, config: DialogConfig) -> Self {
        Self { reason, config }
    }
}

/// Create a linked resolver/pending pair for one dialog
pub(crate) fn channel(config: &DialogConfig) -> (Resolver, PendingOutcome) {
    let (sender, receiver) = oneshot::channel();
    (
        Resolver {
            sender: Some(sender),
        },
        PendingOutcome {
            receiver,
            config: config.clone(),
            observed: false,
        },
    )
}

/// Write side of the outcome channel, owned by the controller
#[derive(Debug)]
pub(crate) struct Resolver {
    sender: Option<oneshot::Sender<Outcome>>,
}

impl Resolver {
    /// Settle the outcome. Returns false if it was already settled.
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // The caller may have dropped its PendingOutcome
                let _ = sender.send(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.sender.is_none()
    }
}

/// Read side of the outcome channel
///
/// Await it from async code, or poll it with [`PendingOutcome::try_take`]
/// from an event loop.
#[derive(Debug)]
pub struct PendingOutcome {
    receiver: oneshot::Receiver<Outcome>,
    /// Used to report `DefaultClosed` if the resolver vanished unsettled
    config: DialogConfig,
    observed: bool,
}

impl PendingOutcome {
    /// Take the outcome if the dialog has settled.
    ///
    /// Returns `Some` exactly once; afterwards it always returns `None`.
    pub fn try_take(&mut self) -> Option<Outcome> {
        if self.observed {
            return None;
        }
        let outcome = match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                Outcome::new(CloseReason::DefaultClosed, self.config.clone())
            }
        };
        self.observed = true;
        Some(outcome)
    }
}

/// Once the outcome has been taken, by `try_take` or an earlier poll, the
/// future stays pending.
impl Future for PendingOutcome {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        if this.observed {
            return Poll::Pending;
        }
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(result) => {
                this.observed = true;
                Poll::Ready(result.unwrap_or_else(|_| {
                    Outcome::new(CloseReason::DefaultClosed, this.config.clone())
                }))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
