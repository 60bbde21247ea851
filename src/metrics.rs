//! Metric helpers for `integration_steps`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. With the `metrics` feature
//! disabled the helpers compile to no-ops.

/// Name of the counter tracking executed steps, labelled by outcome.
pub const STEPS_TOTAL: &str = "integration_steps_steps_total";
/// Name of the counter tracking scenarios that finished with a failed step.
pub const SCENARIOS_FAILED: &str = "integration_steps_scenarios_failed_total";

/// Final state of an executed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The step completed without error.
    Passed,
    /// The step reported a failure.
    Failed,
    /// The step was not run because an earlier step failed.
    Skipped,
}

impl Outcome {
    /// Label value used for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

/// Record one step finishing with `outcome`.
#[cfg(feature = "metrics")]
pub fn inc_steps(outcome: Outcome) {
    metrics::counter!(STEPS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

/// Record one step finishing with `outcome`.
#[cfg(not(feature = "metrics"))]
pub fn inc_steps(_outcome: Outcome) {}

/// Record a failed scenario.
#[cfg(feature = "metrics")]
pub fn inc_failed_scenarios() { metrics::counter!(SCENARIOS_FAILED).increment(1); }

/// Record a failed scenario.
#[cfg(not(feature = "metrics"))]
pub fn inc_failed_scenarios() {}
