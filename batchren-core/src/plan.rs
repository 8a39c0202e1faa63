use crate::error::ConfigError;
use crate::resolver::{resolve, ClaimedPaths, ConflictKind, LiveFs, Outcome, PathProbe};
use crate::rules::RuleSet;
use crate::scanner::{scan_candidates, Candidate, ScanOptions};
use crate::transform::{transform_name, RunClock};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One proposed rename and how the resolver classified it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStats {
    pub candidates: usize,
    pub will_rename: usize,
    pub skipped_noop: usize,
    pub skipped_conflict: usize,
}

impl PlanStats {
    fn record(&mut self, outcome: Outcome) {
        self.candidates += 1;
        match outcome {
            Outcome::WillRename => self.will_rename += 1,
            Outcome::SkippedNoOp => self.skipped_noop += 1,
            Outcome::SkippedConflict(_) => self.skipped_conflict += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub root: PathBuf,
    /// Human readable description of the active rules
    pub rules: String,
    pub created_at: String,
    pub records: Vec<PlanRecord>,
    pub stats: PlanStats,
}

impl Plan {
    pub fn renames(&self) -> impl Iterator<Item = &PlanRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::WillRename)
    }
}

/// Which pass over the records is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Planning,
    Renaming,
}

/// Receives planning and renaming progress. All methods default to doing nothing.
pub trait Progress {
    fn start(&self, _stage: Stage, _total: usize) {}
    fn advance(&self, _record: &PlanRecord) {}
    fn finish(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Make sure the root exists and is a directory, returning its absolute form.
pub fn validate_root(root: &Path) -> Result<PathBuf, ConfigError> {
    let Ok(metadata) = root.metadata() else {
        return Err(ConfigError::RootNotFound(root.to_path_buf()));
    };
    if !metadata.is_dir() {
        return Err(ConfigError::RootNotDirectory(root.to_path_buf()));
    }
    Ok(root.canonicalize().unwrap_or_else(|_| root.to_path_buf()))
}

/// Sort candidates lexically by path and number them in that order.
pub fn order_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    for (index, candidate) in candidates.iter_mut().enumerate() {
        candidate.index = index;
    }
}

/// Walk `root`, transform every candidate and resolve collisions.
pub fn build_plan(
    root: &Path,
    rules: &RuleSet,
    scan: &ScanOptions,
    progress: &dyn Progress,
) -> Result<Plan> {
    let root = validate_root(root)?;
    let mut candidates = scan_candidates(&root, scan)?;
    order_candidates(&mut candidates);

    tracing::info!(
        "Planning {} file(s) under {} ({})",
        candidates.len(),
        root.display(),
        rules
    );

    let records = plan_records(&candidates, rules, &RunClock::now(), &LiveFs, progress);
    Ok(assemble_plan(root, rules, records))
}

/// Transform and resolve already ordered candidates against `probe`.
pub fn plan_records(
    candidates: &[Candidate],
    rules: &RuleSet,
    clock: &RunClock,
    probe: &impl PathProbe,
    progress: &dyn Progress,
) -> Vec<PlanRecord> {
    progress.start(Stage::Planning, candidates.len());

    let mut claimed = ClaimedPaths::new();
    let mut records = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let transformed = transform_name(candidate, rules, clock);
        let new_name = transformed.file_name();
        let destination = candidate.path.with_file_name(&new_name);

        let outcome = if transformed.is_noop() {
            Outcome::SkippedNoOp
        } else if new_name.is_empty() {
            Outcome::SkippedConflict(ConflictKind::EmptyName)
        } else if !is_plain_file_name(&new_name) {
            Outcome::SkippedConflict(ConflictKind::InvalidName)
        } else {
            resolve(&candidate.path, &destination, &mut claimed, probe)
        };

        tracing::debug!(
            "{} -> {}: {:?}",
            candidate.path.display(),
            new_name,
            outcome
        );

        let record = PlanRecord {
            source: candidate.path.clone(),
            destination,
            outcome,
        };
        progress.advance(&record);
        records.push(record);
    }

    progress.finish();
    records
}

/// A name that stays in its directory: no separators, not `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR)
}

fn assemble_plan(root: PathBuf, rules: &RuleSet, records: Vec<PlanRecord>) -> Plan {
    let mut stats = PlanStats::default();
    for record in &records {
        stats.record(record.outcome);
    }

    Plan {
        root,
        rules: rules.to_string(),
        created_at: chrono::Local::now().to_rfc3339(),
        records,
        stats,
    }
}
