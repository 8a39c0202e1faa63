use std::path::PathBuf;
use thiserror::Error;

/// Problems with the run configuration. All of these are detected before the
/// filesystem is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid search pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("path is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("number padding {padding} is too wide (maximum {max})")]
    InvalidPadding { padding: usize, max: usize },

    #[error(
        "No rename options specified. Use --prefix, --suffix, --search/--replace, --number, or --date"
    )]
    NoRules,

    #[error("invalid config file {}: {message}", .path.display())]
    InvalidConfigFile { path: PathBuf, message: String },
}
