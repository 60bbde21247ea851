//! Browser-driving seam used by page objects.
//!
//! [`UiDriver`] exposes the handful of element capabilities the page objects
//! need. Implementations own the browser session; page objects only borrow a
//! driver for the duration of a single step.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Strategy used to find elements on the page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locator {
    /// A CSS selector.
    Css(String),
}

impl Locator {
    /// Build a CSS locator.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self { Self::Css(selector.into()) }

    /// Return the raw selector text.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::Css(selector) => selector,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "css={selector}"),
        }
    }
}

/// Failures reported by a [`UiDriver`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matched the locator, or the requested match index was out
    /// of range.
    #[error("element not found: {0}")]
    ElementNotFound(Locator),
    /// The driver gave up waiting for the browser.
    #[error("timed out waiting for the browser")]
    Timeout,
    /// The browser session reported an error.
    #[error("browser session error: {0}")]
    Session(String),
}

/// Result alias for driver operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Element-level capabilities of a browser session.
///
/// All operations act on the elements matching a [`Locator`] at the moment of
/// the call; none of them wait for elements to appear. Waiting is the job of
/// [`crate::eventually::Eventually`].
#[async_trait]
pub trait UiDriver: Send + Sync {
    /// Return whether at least one element matches `locator`.
    async fn is_present(&self, locator: &Locator) -> DriverResult<bool>;

    /// Replace the value of the first input matching `locator` with `text`.
    async fn set_text(&self, locator: &Locator, text: &str) -> DriverResult<()>;

    /// Click the `index`-th element matching `locator`.
    async fn click(&self, locator: &Locator, index: usize) -> DriverResult<()>;

    /// Return the visible text of every element matching `locator`, in
    /// document order.
    async fn texts(&self, locator: &Locator) -> DriverResult<Vec<String>>;
}

/// A live browser session the runner can navigate and close.
#[async_trait]
pub trait BrowserSession: UiDriver {
    /// Navigate to `url`.
    async fn goto(&self, url: &str) -> DriverResult<()>;

    /// Close the session. Driver calls made afterwards fail.
    async fn quit(&self) -> DriverResult<()>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(DriverError::ElementNotFound(Locator::css("input")), "element not found: css=input")]
    #[case(DriverError::Timeout, "timed out waiting for the browser")]
    #[case(DriverError::Session("gone".into()), "browser session error: gone")]
    fn driver_errors_display(#[case] error: DriverError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
