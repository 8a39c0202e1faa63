use super::{display_path, status_label, status_reason};
use crate::apply::{ExecutionReport, RecordStatus, RunMode};
use nu_ansi_term::Color;
use std::fmt::Write;

/// One line per record, suitable for redirecting to a log.
pub fn render_details(report: &ExecutionReport, use_color: bool) -> String {
    let mut output = String::new();

    for record in &report.records {
        let label = format!("{:<9}", status_label(&record.status));
        let label = if use_color {
            status_color(&record.status).paint(label).to_string()
        } else {
            label
        };

        let from = display_path(&report.root, &record.source);
        write!(output, "{} {}", label, from).unwrap();
        if record.destination != record.source {
            write!(output, " -> {}", display_path(&report.root, &record.destination)).unwrap();
        }
        if let Some(reason) = status_reason(&record.status) {
            write!(output, " ({})", reason).unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

/// Final counts for the run.
pub fn render_summary(report: &ExecutionReport) -> String {
    let mut output = String::new();
    let stats = &report.stats;

    writeln!(output).unwrap();
    match report.mode {
        RunMode::Preview => writeln!(output, "[PREVIEW] use --execute to apply").unwrap(),
        RunMode::Execute => writeln!(output, "[EXECUTED]").unwrap(),
    }
    writeln!(output, "Root: {}", report.root.display()).unwrap();
    writeln!(output, "Rules: {}", report.rules).unwrap();
    match report.mode {
        RunMode::Preview => writeln!(output, "Would rename: {}", stats.would_rename).unwrap(),
        RunMode::Execute => writeln!(output, "Renamed: {}", stats.renamed).unwrap(),
    }
    writeln!(output, "Skipped (no-op): {}", stats.skipped_noop).unwrap();
    writeln!(output, "Skipped (conflict): {}", stats.skipped_conflict).unwrap();
    writeln!(output, "Failed: {}", stats.failed).unwrap();

    if report.has_failures() {
        writeln!(output).unwrap();
        writeln!(output, "Failures:").unwrap();
        for record in report.failures() {
            if let RecordStatus::Failed(message) = &record.status {
                writeln!(output, "  {}", message).unwrap();
            }
        }
    }

    output
}

fn status_color(status: &RecordStatus) -> Color {
    match status {
        RecordStatus::WouldRename => Color::Cyan,
        RecordStatus::Renamed => Color::Green,
        RecordStatus::SkippedNoOp => Color::DarkGray,
        RecordStatus::SkippedConflict(_) => Color::Yellow,
        RecordStatus::Failed(_) => Color::Red,
    }
}
