//! Utilities for exercising [`integration_steps`] bindings in tests.
//!
//! These helpers wire the bundled step registry to an in-memory
//! [`FakeBrowser`] and capture log output for assertions.
//!
//! ```rust
//! use integration_steps_testing::StepHarness;
//!
//! # async fn example() {
//! let harness = StepHarness::new();
//! harness.browser().render("syndesis-integrations-edit-page", [""]);
//! harness
//!     .run("she is presented with a visual integration editor")
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod logging;
pub mod runner;

pub use integration_steps::test_helpers::FakeBrowser;
pub use logging::{LoggerHandle, logger};
pub use runner::{StepHarness, harness};
