//! Canonical error and result types for the crate.
//!
//! This module defines the single public `StepError` surface used by step
//! registration, step matching, and step execution.

use thiserror::Error;

use crate::driver::DriverError;

/// Top-level error type exposed by `integration_steps`.
///
/// `StepError` distinguishes setup-time registration problems from
/// discovery-time matching failures and runtime driver or assertion failures.
#[derive(Debug, Error)]
pub enum StepError {
    /// A step with the same pattern source was already registered.
    #[error("step pattern {0:?} was already registered")]
    DuplicatePattern(String),
    /// A step pattern failed to compile.
    #[error("invalid step pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// Pattern source as written by the step author.
        pattern: String,
        /// Underlying regex compilation error.
        source: regex::Error,
    },
    /// No registered pattern matches the step text.
    #[error("no step definition matches {0:?}")]
    Undefined(String),
    /// More than one registered pattern matches the step text.
    #[error("step {text:?} matches {} definitions: {}", .patterns.len(), .patterns.join(", "))]
    Ambiguous {
        /// Step text that was matched.
        text: String,
        /// Sources of every matching pattern, in registration order.
        patterns: Vec<String>,
    },
    /// A handler asked for a capture group the pattern does not provide.
    #[error("pattern {pattern:?} has no capture group {index}")]
    MissingCapture {
        /// Pattern source of the matched step.
        pattern: String,
        /// Zero-based capture index requested.
        index: usize,
    },
    /// A captured argument was rejected by the handler.
    #[error("invalid {name}: {reason}")]
    InvalidArgument {
        /// Human-readable argument name.
        name: &'static str,
        /// Reason the value was rejected.
        reason: &'static str,
    },
    /// The UI driver could not locate or interact with an element.
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),
    /// A bounded-wait assertion did not hold before its deadline.
    #[error("{message}")]
    Assertion {
        /// Failure message reported verbatim to the runner.
        message: String,
        /// Last driver error observed while polling, if any.
        #[source]
        last_error: Option<DriverError>,
    },
    /// The completion signal was dropped without being resolved.
    #[error("step completed without resolving its outcome")]
    Abandoned,
}

impl StepError {
    /// Build an assertion failure carrying `message`.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
            last_error: None,
        }
    }

    /// Returns true if this error was raised while matching step text rather
    /// than while executing a handler.
    #[must_use]
    pub fn is_discovery(&self) -> bool { matches!(self, Self::Undefined(_) | Self::Ambiguous { .. }) }
}

/// Canonical result alias used by `integration_steps` public APIs.
pub type Result<T> = std::result::Result<T, StepError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use rstest::rstest;

    use super::*;
    use crate::driver::Locator;

    #[rstest]
    fn assertion_displays_message_verbatim() {
        let err = StepError::Assertion {
            message: "there must be edit page root element".into(),
            last_error: Some(DriverError::Timeout),
        };
        assert_eq!(err.to_string(), "there must be edit page root element");
        assert!(err.source().is_some());
    }

    #[rstest]
    fn driver_errors_keep_their_source() {
        let err = StepError::from(DriverError::ElementNotFound(Locator::css("input")));
        assert!(matches!(err, StepError::Driver(_)));
        assert!(err.to_string().contains("input"));
        assert!(err.source().is_some());
    }

    #[rstest]
    #[case(StepError::Undefined("x".into()), true)]
    #[case(StepError::Ambiguous { text: "x".into(), patterns: vec![] }, true)]
    #[case(StepError::Abandoned, false)]
    #[case(StepError::assertion("nope"), false)]
    fn discovery_classification(#[case] err: StepError, #[case] expected: bool) {
        assert_eq!(err.is_discovery(), expected);
    }
}
