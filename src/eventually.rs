//! Bounded-wait assertions.
//!
//! UI state changes asynchronously, so presence checks are retried until they
//! hold or a deadline passes. [`Eventually`] carries the timing; the assertion
//! itself is [`Eventually::assert_true`].

use std::{future::Future, time::Duration};

use tokio::time::{Instant, sleep, timeout};

use crate::{
    driver::{DriverError, DriverResult},
    error::{Result, StepError},
};

/// Longest wait [`Eventually::normalized`] allows.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Timing for bounded polling assertions.
///
/// # Default Values
/// - `timeout`: 10 seconds
/// - `interval`: 100 milliseconds
///
/// # Invariants
/// - both durations are at least 1 millisecond
/// - `timeout` does not exceed [`MAX_TIMEOUT`]
/// - `interval` does not exceed `timeout`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eventually {
    /// Total time allowed for the condition to become true.
    pub timeout: Duration,
    /// Pause between consecutive probes.
    pub interval: Duration,
}

impl Default for Eventually {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            interval: Duration::from_millis(100),
        }
    }
}

impl Eventually {
    /// Replace the overall timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the polling interval.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Clamp durations into `1ms..=MAX_TIMEOUT` and ensure `interval <= timeout`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use integration_steps::eventually::Eventually;
    ///
    /// let cfg = Eventually {
    ///     timeout: Duration::ZERO,
    ///     interval: Duration::from_secs(1),
    /// };
    ///
    /// let normalized = cfg.normalized();
    /// assert_eq!(normalized.timeout, Duration::from_millis(1));
    /// assert_eq!(normalized.interval, Duration::from_millis(1));
    /// ```
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.timeout = self.timeout.clamp(Duration::from_millis(1), MAX_TIMEOUT);
        self.interval = self
            .interval
            .max(Duration::from_millis(1))
            .min(self.timeout);
        self
    }

    /// Poll `probe` until it reports `true` or the timeout elapses.
    ///
    /// Probe errors count as "not yet"; the most recent one is attached to the
    /// failure. Each probe is itself bounded by the time remaining, so a hung
    /// driver call cannot stretch the wait.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Assertion`] carrying `message` if the condition
    /// does not hold before the deadline.
    pub async fn assert_true<P, Fut>(&self, mut probe: P, message: impl Into<String>) -> Result<()>
    where
        P: FnMut() -> Fut,
        Fut: Future<Output = DriverResult<bool>>,
    {
        let cfg = self.normalized();
        let deadline = Instant::now() + cfg.timeout;
        let mut last_error = None;
        let mut attempts = 0_u32;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            match timeout(remaining, probe()).await {
                Ok(Ok(true)) => return Ok(()),
                Ok(Ok(false)) => {}
                Ok(Err(error)) => {
                    tracing::trace!(%error, attempts, "probe failed");
                    last_error = Some(error);
                }
                Err(_) => {
                    last_error = Some(DriverError::Timeout);
                    break;
                }
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            sleep(cfg.interval.min(deadline - now)).await;
        }

        let message = message.into();
        tracing::debug!(%message, attempts, "condition did not hold before deadline");
        Err(StepError::Assertion {
            message,
            last_error,
        })
    }
}
