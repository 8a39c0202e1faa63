#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod output;
pub mod pattern;
pub mod plan;
pub mod preview;
pub mod resolver;
pub mod rules;
pub mod scanner;
pub mod timestamps;
pub mod transform;

pub use apply::{
    execute_plan, execute_plan_with_probe, execute_plan_with_progress, ExecutedRecord,
    ExecutionReport, ExecutionStats, RecordStatus, RunMode,
};
pub use config::Config;
pub use error::ConfigError;
pub use output::{OutputFormat, OutputFormatter};
pub use pattern::{build_pattern, NamePattern};
pub use plan::{
    build_plan, order_candidates, plan_records, validate_root, NoProgress, Plan, PlanRecord,
    PlanStats, Progress, Stage,
};
pub use preview::{render_report, write_report, Preview};
pub use resolver::{resolve, ClaimedPaths, ConflictKind, LiveFs, Outcome, PathProbe};
pub use rules::{
    DatePosition, DateSource, DateStamp, Numbering, NumberingMode, RuleOptions, RuleSet,
    MAX_PADDING,
};
pub use scanner::{scan_candidates, Candidate, ScanOptions};
pub use transform::{split_name, transform_name, RunClock, Transformed};

use anyhow::Result;
use std::path::Path;

/// Plan a run and then execute it (or only preview it) in one call.
/// `progress` sees the planning pass and, in execute mode, the renaming pass.
pub fn run(
    root: &Path,
    rules: &RuleSet,
    scan: &ScanOptions,
    mode: RunMode,
    progress: &dyn Progress,
) -> Result<ExecutionReport> {
    let plan = build_plan(root, rules, scan, progress)?;
    Ok(execute_plan_with_progress(plan, mode, progress))
}
