mod summary;
mod table;

pub use summary::{render_details, render_summary};
pub use table::render_table;

use crate::apply::{ExecutionReport, RecordStatus};
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the per-file part of a report in the requested format.
pub fn render_report(report: &ExecutionReport, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(report, use_color),
        Preview::Summary => render_details(report, use_color),
        Preview::None => String::new(),
    }
}

/// Write the report preview followed by the count summary to stdout
pub fn write_report(report: &ExecutionReport, format: Preview, use_color: Option<bool>) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", render_report(report, format, use_color))?;
    write!(stdout, "{}", render_summary(report))?;
    stdout.flush()?;
    Ok(())
}

/// Path relative to the run root for display, falling back to the full path.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map_or_else(|_| path.display().to_string(), |p| p.display().to_string())
}

pub(crate) fn status_label(status: &RecordStatus) -> &'static str {
    match status {
        RecordStatus::WouldRename => "RENAME",
        RecordStatus::Renamed => "RENAMED",
        RecordStatus::SkippedNoOp => "NO-OP",
        RecordStatus::SkippedConflict(_) => "CONFLICT",
        RecordStatus::Failed(_) => "FAILED",
    }
}

pub(crate) fn status_reason(status: &RecordStatus) -> Option<String> {
    match status {
        RecordStatus::SkippedConflict(kind) => Some(kind.describe().to_string()),
        RecordStatus::Failed(message) => Some(message.clone()),
        _ => None,
    }
}
