use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers whether a path is currently occupied.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;

    /// True when `destination` only differs from `source` by case and both
    /// resolve to the same entry, as happens on case-insensitive filesystems.
    fn is_case_alias(&self, _source: &Path, _destination: &Path) -> bool {
        false
    }
}

/// Probe backed by the live filesystem. Dangling symlinks count as occupied.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveFs;

impl PathProbe for LiveFs {
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_case_alias(&self, source: &Path, destination: &Path) -> bool {
        if source.to_string_lossy().to_lowercase() != destination.to_string_lossy().to_lowercase()
        {
            return false;
        }
        same_entry(source, destination)
    }
}

#[cfg(unix)]
fn same_entry(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (a.symlink_metadata(), b.symlink_metadata()) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_entry(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// A fixed snapshot of occupied paths.
impl PathProbe for HashSet<PathBuf> {
    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Something already lives at the destination
    TargetExists,
    /// An earlier candidate in this run already claimed the destination
    AlreadyClaimed,
    /// The rules produced an empty file name
    EmptyName,
    /// The rules produced a path separator or a `.`/`..` name
    InvalidName,
}

impl ConflictKind {
    pub fn describe(self) -> &'static str {
        match self {
            Self::TargetExists => "target exists",
            Self::AlreadyClaimed => "target claimed by an earlier file",
            Self::EmptyName => "empty file name",
            Self::InvalidName => "name would leave its directory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    WillRename,
    SkippedNoOp,
    SkippedConflict(ConflictKind),
}

/// Destinations claimed so far in the current run.
#[derive(Debug, Clone, Default)]
pub struct ClaimedPaths {
    paths: HashSet<PathBuf>,
}

impl ClaimedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Classify a proposed rename. First claim wins; a destination is never
/// overwritten and never auto-suffixed.
pub fn resolve(
    source: &Path,
    destination: &Path,
    claimed: &mut ClaimedPaths,
    probe: &impl PathProbe,
) -> Outcome {
    if destination == source {
        return Outcome::SkippedNoOp;
    }

    if claimed.contains(destination) {
        return Outcome::SkippedConflict(ConflictKind::AlreadyClaimed);
    }

    if probe.exists(destination) && !probe.is_case_alias(source, destination) {
        return Outcome::SkippedConflict(ConflictKind::TargetExists);
    }

    claimed.paths.insert(destination.to_path_buf());
    Outcome::WillRename
}
