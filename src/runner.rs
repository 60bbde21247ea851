//! Sequential scenario execution.
//!
//! [`ScenarioRunner`] feeds each step of a scenario to the registry and waits
//! for its completion before starting the next. The first failure ends the
//! scenario; every later step is reported as skipped without being run.

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;
use tracing::Instrument;

use crate::{
    driver::{BrowserSession, DriverResult},
    error::StepError,
    eventually::Eventually,
    feature::{Feature, Keyword, Scenario, Step},
    metrics::{self, Outcome},
    registry::StepRegistry,
    world::StepWorld,
};

/// Result of one step.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step completed without error.
    Passed,
    /// The step failed with the contained error.
    Failed(StepError),
    /// An earlier step failed, so this one never ran.
    Skipped,
}

impl StepOutcome {
    /// Metric label for this outcome.
    #[must_use]
    pub const fn kind(&self) -> Outcome {
        match self {
            Self::Passed => Outcome::Passed,
            Self::Failed(_) => Outcome::Failed,
            Self::Skipped => Outcome::Skipped,
        }
    }
}

/// Report for one executed (or skipped) step.
#[derive(Debug)]
pub struct StepReport {
    /// Keyword as written in the scenario.
    pub keyword: Keyword,
    /// Step text.
    pub text: String,
    /// One-based source line.
    pub line: usize,
    /// What happened.
    pub outcome: StepOutcome,
    /// Time spent waiting for the step's completion.
    pub elapsed: Duration,
}

/// Report for one scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Scenario title.
    pub name: String,
    /// Step reports in execution order.
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// Whether every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| matches!(step.outcome, StepOutcome::Passed))
    }

    /// The step that ended the scenario, if any.
    #[must_use]
    pub fn failure(&self) -> Option<(&StepReport, &StepError)> {
        self.steps.iter().find_map(|step| match &step.outcome {
            StepOutcome::Failed(error) => Some((step, error)),
            _ => None,
        })
    }
}

/// Report for a whole feature.
#[derive(Debug)]
pub struct FeatureReport {
    /// Feature title.
    pub name: String,
    /// Scenario reports in file order.
    pub scenarios: Vec<ScenarioReport>,
}

impl FeatureReport {
    /// Whether every scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool { self.scenarios.iter().all(ScenarioReport::passed) }

    /// Scenarios that did not pass.
    pub fn failed_scenarios(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|scenario| !scenario.passed())
    }
}

/// Runs scenarios against a registry and a shared world.
pub struct ScenarioRunner<'a, W> {
    registry: &'a StepRegistry<W>,
    world: Arc<W>,
}

impl<'a, W> ScenarioRunner<'a, W>
where
    W: Send + Sync + 'static,
{
    /// Create a runner dispatching to `registry` with `world`.
    #[must_use]
    pub fn new(registry: &'a StepRegistry<W>, world: Arc<W>) -> Self { Self { registry, world } }

    /// Run every scenario of `feature` in order.
    pub async fn run_feature(&self, feature: &Feature) -> FeatureReport {
        let span = tracing::info_span!("feature", name = %feature.name);
        async {
            let mut scenarios = Vec::with_capacity(feature.scenarios.len());
            for scenario in &feature.scenarios {
                scenarios.push(self.run_scenario(scenario).await);
            }
            FeatureReport {
                name: feature.name.clone(),
                scenarios,
            }
        }
        .instrument(span)
        .await
    }

    /// Run the steps of `scenario` strictly one after another.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let span = tracing::info_span!("scenario", name = %scenario.name);
        async {
            let mut steps = Vec::with_capacity(scenario.steps.len());
            let mut failed = false;
            for step in &scenario.steps {
                let report = if failed {
                    skipped(step)
                } else {
                    self.run_step(step).await
                };
                failed |= matches!(report.outcome, StepOutcome::Failed(_));
                metrics::inc_steps(report.outcome.kind());
                steps.push(report);
            }
            if failed {
                metrics::inc_failed_scenarios();
            }
            ScenarioReport {
                name: scenario.name.clone(),
                steps,
            }
        }
        .instrument(span)
        .await
    }

    async fn run_step(&self, step: &Step) -> StepReport {
        let span = tracing::info_span!("step", keyword = %step.keyword, line = step.line);
        let started = Instant::now();
        let done = span.in_scope(|| self.registry.dispatch(self.world.clone(), &step.text));
        let outcome = match done.instrument(span.clone()).await {
            Ok(()) => {
                span.in_scope(|| tracing::info!(step = %step.text, "step passed"));
                StepOutcome::Passed
            }
            Err(error) => {
                span.in_scope(|| tracing::warn!(step = %step.text, %error, "step failed"));
                StepOutcome::Failed(error)
            }
        };
        StepReport {
            keyword: step.keyword,
            text: step.text.clone(),
            line: step.line,
            outcome,
            elapsed: started.elapsed(),
        }
    }
}

/// Open `base_url` in `session`, run `features` against it, then close it.
///
/// The session is closed on every path once this is called, including when
/// the start page cannot be opened.
///
/// # Errors
///
/// Returns the navigation error if `base_url` cannot be opened; no scenario
/// runs in that case.
pub async fn run_in_session<S>(
    session: Arc<S>,
    registry: &StepRegistry<StepWorld>,
    eventually: Eventually,
    base_url: &str,
    features: &[Feature],
) -> DriverResult<Vec<FeatureReport>>
where
    S: BrowserSession + 'static,
{
    let reports = run_features(session.clone(), registry, eventually, base_url, features).await;
    if let Err(error) = session.quit().await {
        tracing::warn!(%error, "failed to close browser session");
    }
    reports
}

async fn run_features<S>(
    session: Arc<S>,
    registry: &StepRegistry<StepWorld>,
    eventually: Eventually,
    base_url: &str,
    features: &[Feature],
) -> DriverResult<Vec<FeatureReport>>
where
    S: BrowserSession + 'static,
{
    session.goto(base_url).await?;
    let world = StepWorld::new(session).with_eventually(eventually);
    let runner = ScenarioRunner::new(registry, Arc::new(world));
    let mut reports = Vec::with_capacity(features.len());
    for feature in features {
        reports.push(runner.run_feature(feature).await);
    }
    Ok(reports)
}

fn skipped(step: &Step) -> StepReport {
    StepReport {
        keyword: step.keyword,
        text: step.text.clone(),
        line: step.line,
        outcome: StepOutcome::Skipped,
        elapsed: Duration::ZERO,
    }
}
