use crate::error::ConfigError;
use crate::timestamps::best_effort_created;
use crate::transform::split_name;
use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Options controlling which files become rename candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Glob matched against the file name only
    pub pattern: String,
    pub recursive: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
            recursive: true,
        }
    }
}

/// A discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub base_name: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
    pub modified: SystemTime,
    pub created: SystemTime,
    /// Position in traversal order, assigned by the planner
    pub index: usize,
}

impl Candidate {
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }
}

pub fn build_matcher(pattern: &str) -> Result<GlobMatcher, ConfigError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })
}

/// Walk `root` and return every regular file whose name matches the pattern.
///
/// Directories and symlinks are never candidates. Entries that cannot be read
/// are logged and skipped.
pub fn scan_candidates(root: &Path, options: &ScanOptions) -> Result<Vec<Candidate>> {
    let matcher = build_matcher(&options.pattern)?;
    let max_depth = if options.recursive { usize::MAX } else { 1 };

    let mut candidates = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            },
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            tracing::warn!(
                "Skipping file with non UTF-8 name: {}",
                entry.path().display()
            );
            continue;
        };

        if !matcher.is_match(file_name) {
            continue;
        }

        let metadata = match entry
            .metadata()
            .with_context(|| format!("Failed to read metadata for {}", entry.path().display()))
        {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!("{:#}", e);
                continue;
            },
        };

        let (base_name, extension) = split_name(file_name);
        candidates.push(Candidate {
            path: entry.path().to_path_buf(),
            base_name: base_name.to_string(),
            extension: extension.to_string(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            created: best_effort_created(&metadata),
            index: 0,
        });
    }

    tracing::debug!(
        "Found {} candidate(s) under {}",
        candidates.len(),
        root.display()
    );
    Ok(candidates)
}
