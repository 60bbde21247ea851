//! Step bindings shipped with the crate.

pub mod integration;

use crate::{error::Result, registry::StepRegistry, world::StepWorld};

/// Build a registry holding every bundled step.
///
/// # Errors
///
/// Returns an error if two bundled steps share a pattern.
pub fn registry() -> Result<StepRegistry<StepWorld>> { integration::register(StepRegistry::new()) }
