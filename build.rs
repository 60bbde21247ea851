//! Build script generating manual pages from the CLI definition.
//!
//! Writes `integration-steps.1` plus one page per subcommand.

use std::{fs, path::Path};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

fn render(cmd: clap::Command, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf: Vec<u8> = Vec::new();
    Man::new(cmd).render(&mut buf)?;
    fs::write(path, buf)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = Path::new("target/generated-man");
    fs::create_dir_all(out_dir)?;

    let cmd = cli::Cli::command();
    for sub in cmd.get_subcommands() {
        let name = format!("{}-{}", cmd.get_name(), sub.get_name());
        render(sub.clone().display_name(name.clone()), &out_dir.join(format!("{name}.1")))?;
    }
    render(cmd, &out_dir.join("integration-steps.1"))
}
