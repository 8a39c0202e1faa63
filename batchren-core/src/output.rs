use crate::apply::{ExecutionReport, RunMode};
use crate::preview::render_summary;
use serde_json::json;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for ExecutionReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": !self.has_failures(),
            "operation": match self.mode {
                RunMode::Preview => "preview",
                RunMode::Execute => "execute",
            },
            "root": self.root,
            "rules": self.rules,
            "summary": self.stats,
            "records": self.records,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        render_summary(self)
    }
}
