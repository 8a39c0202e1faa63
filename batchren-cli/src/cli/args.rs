use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

use super::types::{DateArg, DatePositionArg, NumberModeArg, OutputFormat, PreviewArg};

/// Batch rename files with composable rules, previewed before anything moves
#[derive(Parser, Debug)]
#[command(name = "batchren")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  batchren ~/Photos --prefix vacation_
  batchren ~/Documents --search draft --replace final
  batchren ~/Images --number --number-mode sequential
  batchren ~/Files --date modified --date-position prefix
  batchren ~/Data --prefix backup_ --number --execute")]
pub struct Cli {
    /// Root directory path to process
    pub path: PathBuf,

    #[command(flatten)]
    pub affix: AffixArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub numbering: NumberArgs,

    #[command(flatten)]
    pub date: DateArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Actually perform the renames (default is a preview)
    #[arg(long)]
    pub execute: bool,

    /// Preview output format (defaults from config if not specified)
    #[arg(long, value_enum)]
    pub preview: Option<PreviewArg>,

    /// Output format for machine consumption
    #[arg(long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Suppress the progress bar and preview (summary is still printed)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug). BATCHREN_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct AffixArgs {
    /// Add prefix to filenames
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Add suffix to filenames (before extension)
    #[arg(long, value_name = "TEXT")]
    pub suffix: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search pattern (regular expression, matched against the name without extension)
    #[arg(long, value_name = "PATTERN")]
    pub search: Option<String>,

    /// Replacement text (use with --search; supports $1 capture references)
    #[arg(long, value_name = "TEXT")]
    pub replace: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct NumberArgs {
    /// Enable numbering
    #[arg(long)]
    pub number: bool,

    /// Numbering mode: 'sequential' replaces the name, 'append' adds _NNN (default: append)
    #[arg(long, value_enum)]
    pub number_mode: Option<NumberModeArg>,

    /// Starting number (default: 1)
    #[arg(long, value_name = "N")]
    pub number_start: Option<u64>,

    /// Zero padding width (default: 3, e.g. 001)
    #[arg(long, value_name = "N")]
    pub number_padding: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct DateArgs {
    /// Add a YYYYMMDD date to filenames
    #[arg(long, value_enum)]
    pub date: Option<DateArg>,

    /// Where to add the date (default: prefix)
    #[arg(long, value_enum)]
    pub date_position: Option<DatePositionArg>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// File name glob to match (default: *)
    #[arg(long, value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Don't process subdirectories
    #[arg(long)]
    pub no_recursive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "batchren",
            "/photos",
            "--prefix",
            "trip_",
            "--search",
            r"\d+",
            "--replace",
            "",
            "--number",
            "--number-mode",
            "sequential",
            "--number-start",
            "10",
            "--date",
            "created",
            "--date-position",
            "suffix",
            "--pattern",
            "*.jpg",
            "--no-recursive",
            "--execute",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.path, PathBuf::from("/photos"));
        assert_eq!(cli.affix.prefix.as_deref(), Some("trip_"));
        assert_eq!(cli.search.replace.as_deref(), Some(""));
        assert!(cli.numbering.number);
        assert_eq!(cli.numbering.number_mode, Some(NumberModeArg::Sequential));
        assert_eq!(cli.numbering.number_start, Some(10));
        assert_eq!(cli.numbering.number_padding, None);
        assert_eq!(cli.date.date, Some(DateArg::Created));
        assert_eq!(cli.date.date_position, Some(DatePositionArg::Suffix));
        assert_eq!(cli.filter.pattern.as_deref(), Some("*.jpg"));
        assert!(cli.filter.no_recursive);
        assert!(cli.execute);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_no_color_flag() {
        let cli = Cli::try_parse_from(["batchren", ".", "--no-color"]).unwrap();
        assert!(cli.no_color);
    }

    #[test]
    fn test_invalid_enum_value_rejected() {
        let result = Cli::try_parse_from(["batchren", ".", "--date", "yesterday"]);
        assert!(result.is_err());
    }
}
