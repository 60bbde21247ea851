//! Public API for the `integration_steps` library.
//!
//! This crate binds Gherkin step phrases for the integration editor UI to
//! page-object calls. It provides the step registry, completion signalling,
//! bounded-wait assertions, page objects, and a sequential scenario runner.

pub mod check;
pub mod completion;
pub mod driver;
pub mod error;
/// Result type alias re-exported for convenience when registering steps.
pub use error::Result;
pub mod eventually;
pub mod feature;
pub mod metrics;
pub mod page;
pub mod pattern;
pub mod registry;
pub mod runner;
pub mod steps;
pub mod test_helpers;
#[cfg(feature = "webdriver")]
pub mod webdriver;
pub mod world;

pub use check::{Diagnostic, check};
pub use completion::{Completion, CompletionSignal, completion};
pub use driver::{BrowserSession, DriverError, Locator, UiDriver};
pub use error::StepError;
pub use eventually::Eventually;
pub use feature::{Feature, FeatureError, Keyword, Scenario, Step};
pub use pattern::{Captures, StepPattern};
pub use registry::{StepDefinition, StepRegistry};
pub use runner::{
    FeatureReport,
    ScenarioReport,
    ScenarioRunner,
    StepOutcome,
    StepReport,
    run_in_session,
};
pub use world::StepWorld;
