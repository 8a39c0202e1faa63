use anyhow::Result;
use batchren_core::{
    run, write_report, Config, ExecutionReport, OutputFormatter, Preview, RuleOptions, RuleSet,
    RunMode, ScanOptions,
};
use std::str::FromStr;

use crate::cli::{Cli, OutputFormat};
use crate::progress::ProgressReporter;

/// Merge CLI flags over config defaults into raw rule options.
pub fn rule_options(cli: &Cli, config: &Config) -> RuleOptions {
    let defaults = &config.defaults;
    RuleOptions {
        prefix: cli.affix.prefix.clone(),
        suffix: cli.affix.suffix.clone(),
        search: cli.search.search.clone(),
        replace: cli.search.replace.clone(),
        number: cli.numbering.number,
        number_mode: cli
            .numbering
            .number_mode
            .map_or(defaults.number_mode, Into::into),
        number_start: cli.numbering.number_start.unwrap_or(defaults.number_start),
        number_padding: cli
            .numbering
            .number_padding
            .unwrap_or(defaults.number_padding),
        date: cli.date.date.map(Into::into),
        date_position: cli
            .date
            .date_position
            .map_or(defaults.date_position, Into::into),
    }
}

pub fn scan_options(cli: &Cli, config: &Config) -> ScanOptions {
    ScanOptions {
        pattern: cli
            .filter
            .pattern
            .clone()
            .unwrap_or_else(|| config.defaults.pattern.clone()),
        recursive: !cli.filter.no_recursive,
    }
}

fn preview_format(cli: &Cli, config: &Config) -> Preview {
    cli.preview.map_or_else(
        || Preview::from_str(&config.defaults.preview_format).unwrap_or(Preview::Table),
        Into::into,
    )
}

/// Build the plan, apply or preview it, and print the result.
pub fn handle_run(cli: &Cli, config: &Config) -> Result<ExecutionReport> {
    let rules = RuleSet::from_options(&rule_options(cli, config))?;
    let scan = scan_options(cli, config);
    let mode = if cli.execute {
        RunMode::Execute
    } else {
        RunMode::Preview
    };

    let json = cli.output == OutputFormat::Json;
    let progress = ProgressReporter::new(cli.quiet || json);
    let report = run(&cli.path, &rules, &scan, mode, &progress)?;

    if json {
        println!("{}", report.format(cli.output.into()));
        return Ok(report);
    }

    let use_color = if cli.no_color {
        Some(false)
    } else {
        config.defaults.use_color
    };
    let preview = if cli.quiet {
        Preview::None
    } else {
        preview_format(cli, config)
    };
    write_report(&report, preview, use_color)?;

    Ok(report)
}
