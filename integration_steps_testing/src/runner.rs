//! Registry, world and fake browser bundled for step tests.

use std::{sync::Arc, time::Duration};

use integration_steps::{
    Eventually,
    Feature,
    FeatureReport,
    Result,
    ScenarioRunner,
    StepRegistry,
    StepWorld,
    steps,
    test_helpers::FakeBrowser,
};
use rstest::fixture;

/// Bounded-wait timing used by the harness: short enough to keep failing
/// assertions quick under real time.
pub const TEST_EVENTUALLY: Eventually = Eventually {
    timeout: Duration::from_millis(500),
    interval: Duration::from_millis(10),
};

/// Bundled steps driving a [`FakeBrowser`].
pub struct StepHarness {
    browser: FakeBrowser,
    world: Arc<StepWorld>,
    registry: StepRegistry<StepWorld>,
}

impl StepHarness {
    /// Build a harness with [`TEST_EVENTUALLY`] timing.
    ///
    /// # Panics
    ///
    /// Panics if the bundled steps fail to register.
    #[must_use]
    pub fn new() -> Self { Self::with_eventually(TEST_EVENTUALLY) }

    /// Build a harness with custom assertion timing.
    ///
    /// # Panics
    ///
    /// Panics if the bundled steps fail to register.
    #[must_use]
    pub fn with_eventually(eventually: Eventually) -> Self {
        let browser = FakeBrowser::new();
        let world = StepWorld::new(Arc::new(browser.clone())).with_eventually(eventually);
        let registry = steps::registry().expect("bundled steps register");
        Self {
            browser,
            world: Arc::new(world),
            registry,
        }
    }

    /// The page the steps drive.
    #[must_use]
    pub fn browser(&self) -> &FakeBrowser { &self.browser }

    /// The bundled registry.
    #[must_use]
    pub fn registry(&self) -> &StepRegistry<StepWorld> { &self.registry }

    /// Dispatch a single step and await its completion.
    ///
    /// # Errors
    ///
    /// Returns the step's failure.
    pub async fn run(&self, text: &str) -> Result<()> {
        self.registry.dispatch(self.world.clone(), text).await
    }

    /// Parse `source` and run every scenario in it.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a valid feature.
    pub async fn run_feature(&self, source: &str) -> FeatureReport {
        let feature = Feature::parse(source).expect("feature parses");
        ScenarioRunner::new(&self.registry, self.world.clone())
            .run_feature(&feature)
            .await
    }
}

impl Default for StepHarness {
    fn default() -> Self { Self::new() }
}

#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn harness() -> StepHarness { StepHarness::new() }
