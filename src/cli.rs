//! Command line interface for the `integration-steps` binary.
//!
//! Lists the bundled step definitions, checks feature files against them,
//! and (with the `webdriver` feature) runs features in a real browser.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line arguments for the `integration-steps` binary.
#[derive(Debug, Parser)]
#[command(
    name = "integration-steps",
    version,
    about = "Gherkin step bindings for the integration editor"
)]
pub struct Cli {
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every registered step pattern.
    List,
    /// Report undefined or ambiguous steps in feature files.
    Check {
        /// Feature files to check.
        #[arg(required = true)]
        features: Vec<PathBuf>,
    },
    /// Run feature files against a WebDriver session.
    Run(RunArgs),
}

/// Arguments of the `run` subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// WebDriver server URL.
    #[arg(long, default_value = "http://localhost:4444")]
    pub webdriver: String,
    /// Application URL opened before the first scenario.
    #[arg(long)]
    pub base_url: String,
    /// Bounded-wait timeout for assertion steps, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
    /// Polling interval for assertion steps, in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,
    /// Feature files to run.
    #[arg(required = true)]
    pub features: Vec<PathBuf>,
}
