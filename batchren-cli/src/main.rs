use anyhow::Result;
use batchren_core::{Config, ConfigError};
use clap::Parser;
use std::process;

mod cli;
mod logging;
mod progress;
mod run;

use cli::Cli;

/// A run finished but at least one rename failed.
const EXIT_FAILED_RENAMES: i32 = 1;
/// Bad configuration; nothing was touched.
const EXIT_CONFIG: i32 = 2;
/// Anything else.
const EXIT_INTERNAL: i32 = 3;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match execute(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let exit_code = if e.downcast_ref::<ConfigError>().is_some() {
                EXIT_CONFIG
            } else {
                EXIT_INTERNAL
            };
            process::exit(exit_code);
        },
    }
}

fn execute(cli: &Cli) -> Result<i32> {
    let config = Config::load()?;
    let report = run::handle_run(cli, &config)?;

    if report.has_failures() {
        tracing::error!(
            "{} of {} rename(s) failed",
            report.stats.failed,
            report.stats.failed + report.stats.renamed
        );
        return Ok(EXIT_FAILED_RENAMES);
    }
    Ok(0)
}
