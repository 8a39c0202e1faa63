use super::{display_path, status_label, status_reason};
use crate::apply::{ExecutionReport, RecordStatus};
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};
use std::io::{self, IsTerminal};

/// Render the report as a table of source, destination and status.
pub fn render_table(report: &ExecutionReport, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(20)), // From
            ColumnConstraint::LowerBoundary(Width::Fixed(20)), // To
            ColumnConstraint::Absolute(Width::Fixed(10)),      // Status
            ColumnConstraint::LowerBoundary(Width::Fixed(10)), // Reason
        ]);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("From").fg(Color::Cyan),
            Cell::new("To").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Reason").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["From", "To", "Status", "Reason"]);
    }

    for record in &report.records {
        let from = display_path(&report.root, &record.source);
        let to = if record.destination == record.source {
            String::new()
        } else {
            format!("→ {}", display_path(&report.root, &record.destination))
        };
        let label = status_label(&record.status);
        let reason = status_reason(&record.status).unwrap_or_default();

        if use_color {
            table.add_row(vec![
                Cell::new(&from),
                Cell::new(&to).fg(Color::Magenta),
                Cell::new(label).fg(status_color(&record.status)),
                Cell::new(&reason),
            ]);
        } else {
            table.add_row(vec![&from, &to, label, &reason]);
        }
    }

    table.to_string()
}

fn status_color(status: &RecordStatus) -> Color {
    match status {
        RecordStatus::WouldRename => Color::Blue,
        RecordStatus::Renamed => Color::Green,
        RecordStatus::SkippedNoOp => Color::DarkGrey,
        RecordStatus::SkippedConflict(_) => Color::Yellow,
        RecordStatus::Failed(_) => Color::Red,
    }
}
