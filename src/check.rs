//! Static checking of feature files against a registry.
//!
//! Every step is matched without being run; steps that match no definition,
//! or more than one, are reported with their source location.

use std::{collections::BTreeSet, fmt, path::PathBuf};

use crate::{error::StepError, feature::Feature, registry::StepRegistry};

/// One step that cannot be dispatched.
#[derive(Debug)]
pub struct Diagnostic {
    /// Feature file the step came from.
    pub path: PathBuf,
    /// One-based line of the step.
    pub line: usize,
    /// Why the step cannot be dispatched.
    pub error: StepError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.error)
    }
}

/// Match every step of `feature` against `registry`.
///
/// Background steps repeat in every scenario and outline steps repeat per
/// examples row; each distinct `(line, text)` pair is reported at most once.
#[must_use]
pub fn check<W>(
    registry: &StepRegistry<W>,
    path: impl Into<PathBuf>,
    feature: &Feature,
) -> Vec<Diagnostic>
where
    W: Send + Sync + 'static,
{
    let path = path.into();
    let mut seen = BTreeSet::new();
    feature
        .scenarios
        .iter()
        .flat_map(|scenario| &scenario.steps)
        .filter(|step| seen.insert((step.line, step.text.as_str())))
        .filter_map(|step| {
            registry.find(&step.text).err().map(|error| Diagnostic {
                path: path.clone(),
                line: step.line,
                error,
            })
        })
        .collect()
}
