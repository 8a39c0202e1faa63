use crate::plan::{NoProgress, Plan, PlanRecord, Progress, Stage};
use crate::resolver::{ConflictKind, LiveFs, Outcome, PathProbe};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Report the plan without touching the filesystem
    #[default]
    Preview,
    Execute,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RecordStatus {
    WouldRename,
    Renamed,
    SkippedNoOp,
    SkippedConflict(ConflictKind),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStats {
    pub would_rename: usize,
    pub renamed: usize,
    pub skipped_noop: usize,
    pub skipped_conflict: usize,
    pub failed: usize,
}

impl ExecutionStats {
    fn record(&mut self, status: &RecordStatus) {
        match status {
            RecordStatus::WouldRename => self.would_rename += 1,
            RecordStatus::Renamed => self.renamed += 1,
            RecordStatus::SkippedNoOp => self.skipped_noop += 1,
            RecordStatus::SkippedConflict(_) => self.skipped_conflict += 1,
            RecordStatus::Failed(_) => self.failed += 1,
        }
    }
}

/// What happened to every record of a plan. Authoritative after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub mode: RunMode,
    pub root: PathBuf,
    pub rules: String,
    pub records: Vec<ExecutedRecord>,
    pub stats: ExecutionStats,
}

impl ExecutionReport {
    pub fn has_failures(&self) -> bool {
        self.stats.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExecutedRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.status, RecordStatus::Failed(_)))
    }
}

/// Consume a plan. In preview mode nothing is renamed; in execute mode every
/// approved record is renamed and failures are collected without stopping.
pub fn execute_plan(plan: Plan, mode: RunMode) -> ExecutionReport {
    execute_plan_with_probe(plan, mode, &LiveFs, &NoProgress)
}

/// Like [`execute_plan`], reporting each record to `progress` while renaming.
pub fn execute_plan_with_progress(
    plan: Plan,
    mode: RunMode,
    progress: &dyn Progress,
) -> ExecutionReport {
    execute_plan_with_probe(plan, mode, &LiveFs, progress)
}

pub fn execute_plan_with_probe(
    plan: Plan,
    mode: RunMode,
    probe: &impl PathProbe,
    progress: &dyn Progress,
) -> ExecutionReport {
    let mut stats = ExecutionStats::default();
    let mut records = Vec::with_capacity(plan.records.len());

    if mode == RunMode::Execute {
        progress.start(Stage::Renaming, plan.stats.will_rename);
    }

    for record in plan.records {
        let status = match (record.outcome, mode) {
            (Outcome::SkippedNoOp, _) => RecordStatus::SkippedNoOp,
            (Outcome::SkippedConflict(kind), _) => RecordStatus::SkippedConflict(kind),
            (Outcome::WillRename, RunMode::Preview) => RecordStatus::WouldRename,
            (Outcome::WillRename, RunMode::Execute) => {
                let status = match apply_record(&record, probe) {
                    Ok(()) => {
                        tracing::info!(
                            "Renamed {} -> {}",
                            record.source.display(),
                            record.destination.display()
                        );
                        RecordStatus::Renamed
                    },
                    Err(e) => {
                        tracing::warn!("{:#}", e);
                        RecordStatus::Failed(format!("{:#}", e))
                    },
                };
                progress.advance(&record);
                status
            },
        };

        stats.record(&status);
        records.push(ExecutedRecord {
            source: record.source,
            destination: record.destination,
            status,
        });
    }

    if mode == RunMode::Execute {
        progress.finish();
    }

    if stats.failed > 0 {
        tracing::warn!("{} rename(s) failed", stats.failed);
    }

    ExecutionReport {
        mode,
        root: plan.root,
        rules: plan.rules,
        records,
        stats,
    }
}

fn apply_record(record: &PlanRecord, probe: &impl PathProbe) -> Result<()> {
    let PlanRecord {
        source,
        destination,
        ..
    } = record;

    // The plan was computed earlier; the target may have appeared since.
    if probe.exists(destination) && !probe.is_case_alias(source, destination) {
        return Err(anyhow!(
            "Failed to rename {}: target {} became occupied",
            source.display(),
            destination.display()
        ));
    }

    rename_file(source, destination)
}

fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .with_context(|| format!("Failed to rename {} to {}", from.display(), to.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanStats;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn plan_with(root: &Path, records: Vec<PlanRecord>) -> Plan {
        Plan {
            root: root.to_path_buf(),
            rules: "test".to_string(),
            created_at: chrono::Local::now().to_rfc3339(),
            records,
            stats: PlanStats::default(),
        }
    }

    fn record(root: &Path, from: &str, to: &str, outcome: Outcome) -> PlanRecord {
        PlanRecord {
            source: root.join(from),
            destination: root.join(to),
            outcome,
        }
    }

    #[test]
    fn test_preview_does_not_rename() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();

        let plan = plan_with(
            temp_dir.path(),
            vec![record(temp_dir.path(), "a.txt", "b.txt", Outcome::WillRename)],
        );
        let report = execute_plan(plan, RunMode::Preview);

        assert_eq!(report.records[0].status, RecordStatus::WouldRename);
        assert_eq!(report.stats.would_rename, 1);
        assert!(temp_dir.path().join("a.txt").exists());
        assert!(!temp_dir.path().join("b.txt").exists());
    }

    #[test]
    fn test_execute_renames_approved_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("c.txt"), "c").unwrap();

        let plan = plan_with(
            root,
            vec![
                record(root, "a.txt", "x.txt", Outcome::WillRename),
                record(
                    root,
                    "b.txt",
                    "x.txt",
                    Outcome::SkippedConflict(ConflictKind::AlreadyClaimed),
                ),
                record(root, "c.txt", "c.txt", Outcome::SkippedNoOp),
            ],
        );
        let report = execute_plan(plan, RunMode::Execute);

        assert_eq!(report.stats.renamed, 1);
        assert_eq!(report.stats.skipped_conflict, 1);
        assert_eq!(report.stats.skipped_noop, 1);
        assert!(!report.has_failures());
        assert_eq!(fs::read_to_string(root.join("x.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "b");
        assert!(root.join("c.txt").exists());
    }

    #[test]
    fn test_failure_does_not_abort_run() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("present.txt"), "p").unwrap();

        let plan = plan_with(
            root,
            vec![
                record(root, "vanished.txt", "gone.txt", Outcome::WillRename),
                record(root, "present.txt", "kept.txt", Outcome::WillRename),
            ],
        );
        let report = execute_plan(plan, RunMode::Execute);

        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.renamed, 1);
        let failure = report.failures().next().unwrap();
        match &failure.status {
            RecordStatus::Failed(message) => assert!(message.contains("vanished.txt")),
            other => panic!("unexpected status {:?}", other),
        }
        assert!(root.join("kept.txt").exists());
    }

    #[test]
    fn test_target_occupied_mid_run_is_failure() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("late.txt"), "late").unwrap();

        let plan = plan_with(
            root,
            vec![record(root, "a.txt", "late.txt", Outcome::WillRename)],
        );
        let report = execute_plan(plan, RunMode::Execute);

        assert!(report.has_failures());
        assert_eq!(fs::read_to_string(root.join("late.txt")).unwrap(), "late");
        assert!(root.join("a.txt").exists());
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: std::cell::RefCell<Vec<String>>,
    }

    impl Progress for RecordingProgress {
        fn start(&self, stage: Stage, total: usize) {
            self.events.borrow_mut().push(format!("{:?} {}", stage, total));
        }
        fn advance(&self, record: &PlanRecord) {
            let name = record.source.file_name().unwrap().to_string_lossy().to_string();
            self.events.borrow_mut().push(name);
        }
        fn finish(&self) {
            self.events.borrow_mut().push("finish".to_string());
        }
    }

    #[test]
    fn test_execute_reports_progress() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();

        let mut plan = plan_with(
            root,
            vec![
                record(root, "a.txt", "b.txt", Outcome::WillRename),
                record(root, "c.txt", "c.txt", Outcome::SkippedNoOp),
            ],
        );
        plan.stats.will_rename = 1;

        let progress = RecordingProgress::default();
        execute_plan_with_progress(plan, RunMode::Execute, &progress);
        assert_eq!(
            progress.events.into_inner(),
            vec!["Renaming 1", "a.txt", "finish"]
        );
    }

    #[test]
    fn test_preview_reports_no_progress() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let mut plan = plan_with(
            root,
            vec![record(root, "a.txt", "b.txt", Outcome::WillRename)],
        );
        plan.stats.will_rename = 1;

        let progress = RecordingProgress::default();
        execute_plan_with_progress(plan, RunMode::Preview, &progress);
        assert!(progress.events.into_inner().is_empty());
    }

    #[test]
    fn test_snapshot_probe_blocks_rename() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "a").unwrap();

        let occupied: HashSet<PathBuf> = [root.join("b.txt")].into_iter().collect();
        let plan = plan_with(
            root,
            vec![record(root, "a.txt", "b.txt", Outcome::WillRename)],
        );
        let report = execute_plan_with_probe(plan, RunMode::Execute, &occupied, &NoProgress);

        assert!(report.has_failures());
        assert!(root.join("a.txt").exists());
    }
}
