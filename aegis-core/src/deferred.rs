//! Single-slot pending-request register
//!
//! A controller hands a future to [`Deferred::schedule`]. The future runs on a
//! tokio task that only computes; its output comes back over a private
//! channel tagged with a ticket and is applied by the owner during
//! `try_take`/`next`. Scheduling again cancels the previous task, and only
//! the output carrying the current ticket is ever handed back, so a stale
//! completion cannot overwrite newer state.
//!
//! The future runs on its own task so a panic inside it surfaces as
//! [`Panicked`] instead of leaving the slot pending forever.

use std::any::Any;
use std::future::Future;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio_util::sync::CancellationToken;

/// The scheduled future panicked before producing an outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("task panicked: {message}")]
pub struct Panicked {
    pub message: String,
}

impl Panicked {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "non-string panic payload".to_string(),
            },
        };
        Self { message }
    }
}

pub type Outcome<T> = std::result::Result<T, Panicked>;

struct Completion<T> {
    ticket: u64,
    outcome: Outcome<T>,
}

struct Pending {
    ticket: u64,
    cancel: CancellationToken,
    work: AbortHandle,
    forward: JoinHandle<()>,
}

impl Pending {
    fn abort(self) {
        self.cancel.cancel();
        self.work.abort();
        self.forward.abort();
    }
}

pub struct Deferred<T> {
    tx: mpsc::UnboundedSender<Completion<T>>,
    rx: mpsc::UnboundedReceiver<Completion<T>>,
    next_ticket: u64,
    pending: Option<Pending>,
}

impl<T: Send + 'static> Deferred<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            next_ticket: 1,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Spawn `fut`, replacing (and cancelling) whatever was pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, fut: F) -> u64
    where
        F: Future<Output = T> + Send + 'static,
    {
        if self.cancel() {
            tracing::debug!("superseded pending completion");
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tx = self.tx.clone();
        let work = tokio::spawn(fut);
        let work_abort = work.abort_handle();
        let forward = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::trace!(ticket, "deferred completion cancelled");
                }
                joined = work => {
                    let outcome = match joined {
                        Ok(outcome) => Ok(outcome),
                        Err(err) if err.is_panic() => {
                            let panicked = Panicked::from_payload(err.into_panic());
                            tracing::error!(ticket, error = %panicked, "deferred task panicked");
                            Err(panicked)
                        }
                        // Aborted through cancel(); the owner no longer wants it.
                        Err(_) => return,
                    };
                    // Receiver lives as long as the owner; a send error means it was dropped.
                    let _ = tx.send(Completion { ticket, outcome });
                }
            }
        });

        self.pending = Some(Pending {
            ticket,
            cancel,
            work: work_abort,
            forward,
        });
        ticket
    }

    /// Cancel the pending completion, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.abort();
                true
            }
            None => false,
        }
    }

    /// Take the current completion if it has arrived, without waiting
    pub fn try_take(&mut self) -> Option<Outcome<T>> {
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(outcome) = self.accept(completion) {
                return Some(outcome);
            }
        }
        None
    }

    /// Wait for the current completion. Returns `None` at once when nothing is pending.
    pub async fn next(&mut self) -> Option<Outcome<T>> {
        while self.pending.is_some() {
            let completion = self.rx.recv().await?;
            if let Some(outcome) = self.accept(completion) {
                return Some(outcome);
            }
        }
        None
    }

    fn accept(&mut self, completion: Completion<T>) -> Option<Outcome<T>> {
        match &self.pending {
            Some(pending) if pending.ticket == completion.ticket => {
                self.pending = None;
                Some(completion.outcome)
            }
            _ => {
                tracing::debug!(ticket = completion.ticket, "discarding stale completion");
                None
            }
        }
    }
}

impl<T: Send + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deferred<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
