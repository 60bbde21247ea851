//! `integration-steps` binary.
//!
//! Lists the bundled step bindings, checks feature files for undefined or
//! ambiguous steps, and runs features against a WebDriver session.

mod cli;

use std::{fs, path::Path, process::ExitCode};

use clap::Parser;
use cli::{Cli, Command, RunArgs};
use integration_steps::{Feature, StepRegistry, StepWorld, steps};

fn main() -> ExitCode {
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let registry = match steps::registry() {
        Ok(registry) => registry,
        Err(error) => {
            eprintln!("failed to register steps: {error}");
            return ExitCode::FAILURE;
        }
    };
    match cli.command {
        Command::List => {
            for definition in registry.definitions() {
                println!("{} {}", definition.keyword(), definition.pattern().source());
            }
            ExitCode::SUCCESS
        }
        Command::Check { features } => {
            let problems: usize = features.iter().map(|path| check(&registry, path)).sum();
            if problems == 0 {
                ExitCode::SUCCESS
            } else {
                eprintln!("{problems} problem(s) found");
                ExitCode::FAILURE
            }
        }
        Command::Run(args) => run(&registry, &args),
    }
}

fn load(path: &Path) -> Result<Feature, String> {
    let source = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    Feature::parse(&source).map_err(|e| format!("{}: {e}", path.display()))
}

/// Print every undefined or ambiguous step in `path`, returning how many.
fn check(registry: &StepRegistry<StepWorld>, path: &Path) -> usize {
    let feature = match load(path) {
        Ok(feature) => feature,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };
    let diagnostics = integration_steps::check(registry, path, &feature);
    for diagnostic in &diagnostics {
        println!("{diagnostic}");
    }
    diagnostics.len()
}

#[cfg(feature = "webdriver")]
fn run(registry: &StepRegistry<StepWorld>, args: &RunArgs) -> ExitCode {
    use std::{sync::Arc, time::Duration};

    use integration_steps::{Eventually, run_in_session, webdriver::WebDriverSession};

    let mut features = Vec::with_capacity(args.features.len());
    for path in &args.features {
        match load(path) {
            Ok(feature) => features.push(feature),
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        }
    }
    let eventually = Eventually::default()
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .with_interval(Duration::from_millis(args.interval_ms));

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("failed to start runtime: {error}");
            return ExitCode::FAILURE;
        }
    };
    let reports = runtime.block_on(async {
        match WebDriverSession::connect(&args.webdriver).await {
            Ok(session) => {
                run_in_session(Arc::new(session), registry, eventually, &args.base_url, &features)
                    .await
            }
            Err(error) => Err(error),
        }
    });
    let reports = match reports {
        Ok(reports) => reports,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = 0_usize;
    for report in &reports {
        for scenario in report.failed_scenarios() {
            failed += 1;
            if let Some((step, error)) = scenario.failure() {
                println!(
                    "FAILED {} / {} (line {}): {} {}: {error}",
                    report.name, scenario.name, step.line, step.keyword, step.text
                );
            }
        }
    }
    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        println!("{failed} scenario(s) failed");
        ExitCode::FAILURE
    }
}

#[cfg(not(feature = "webdriver"))]
fn run(_registry: &StepRegistry<StepWorld>, _args: &RunArgs) -> ExitCode {
    eprintln!("integration-steps was built without the `webdriver` feature");
    ExitCode::FAILURE
}
