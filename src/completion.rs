//! One-shot completion signalling for step execution.
//!
//! A [`CompletionSignal`] is handed to whoever runs a step handler and is
//! consumed when resolved, so an outcome can be reported at most once. The
//! paired [`Completion`] future yields that outcome, or
//! [`StepError::Abandoned`] if the signal was dropped unresolved (for example
//! because the handler task panicked). Either way the runner receives exactly
//! one result per step.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;

use crate::error::{Result, StepError};

/// Create a connected signal/completion pair.
#[must_use]
pub fn completion() -> (CompletionSignal, Completion) {
    let (tx, rx) = oneshot::channel();
    (CompletionSignal { tx }, Completion { rx })
}

/// Sender half used to report a step outcome.
#[derive(Debug)]
#[must_use = "an unresolved signal reports the step as abandoned"]
pub struct CompletionSignal {
    tx: oneshot::Sender<Result<()>>,
}

impl CompletionSignal {
    /// Report success.
    pub fn succeed(self) { self.resolve(Ok(())); }

    /// Report failure with `error`.
    pub fn fail(self, error: StepError) { self.resolve(Err(error)); }

    /// Report `outcome`.
    ///
    /// A receiver that has already gone away is not an error; the outcome is
    /// discarded.
    pub fn resolve(self, outcome: Result<()>) {
        if self.tx.send(outcome).is_err() {
            tracing::debug!("step outcome discarded: completion no longer awaited");
        }
    }
}

/// Future resolving to the outcome reported through a [`CompletionSignal`].
#[derive(Debug)]
#[must_use = "completions do nothing unless awaited"]
pub struct Completion {
    rx: oneshot::Receiver<Result<()>>,
}

impl Completion {
    /// A completion that is already resolved with `outcome`.
    pub fn ready(outcome: Result<()>) -> Self {
        let (signal, completion) = completion();
        signal.resolve(outcome);
        completion
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or_else(|_| Err(StepError::Abandoned)))
    }
}
