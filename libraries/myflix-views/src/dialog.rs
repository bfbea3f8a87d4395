//! Modal dialog handles.
//!
//! A view owns its [`DialogRef`]; whoever opened the dialog holds the
//! matching [`AfterClosed`] and learns the closing result exactly once.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tracing::debug;

/// How a dialog was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    /// The login went through and the session is established.
    Authenticated,
    /// The view finished its work without a result worth reporting.
    Closed,
    /// The user walked away before finishing.
    Cancelled,
}

/// Handle a view uses to close its hosting dialog.
#[derive(Debug)]
pub struct DialogRef {
    sender: Option<oneshot::Sender<DialogResult>>,
    result: Option<DialogResult>,
}

impl DialogRef {
    /// Open a dialog, returning the view's handle and the opener's result future.
    pub fn open() -> (Self, AfterClosed) {
        let (sender, receiver) = oneshot::channel();
        (
            Self {
                sender: Some(sender),
                result: None,
            },
            AfterClosed { receiver },
        )
    }

    pub fn is_open(&self) -> bool {
        self.sender.is_some()
    }

    /// The result the dialog was closed with, once closed.
    pub fn result(&self) -> Option<DialogResult> {
        self.result
    }

    /// Close the dialog. Only the first close is delivered.
    pub fn close(&mut self, result: DialogResult) {
        if let Some(sender) = self.sender.take() {
            debug!(result = ?result, "Dialog closed");
            self.result = Some(result);
            // The opener may have stopped listening.
            let _ = sender.send(result);
        }
    }
}

impl Drop for DialogRef {
    fn drop(&mut self) {
        self.close(DialogResult::Cancelled);
    }
}

/// Resolves with the dialog's closing result.
#[derive(Debug)]
pub struct AfterClosed {
    receiver: oneshot::Receiver<DialogResult>,
}

impl Future for AfterClosed {
    type Output = DialogResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(DialogResult::Cancelled))
    }
}
