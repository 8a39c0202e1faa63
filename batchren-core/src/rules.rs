use crate::error::ConfigError;
use crate::pattern::{build_pattern, NamePattern};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NumberingMode {
    /// Replace the whole base name with the number
    Sequential,
    /// Append `_<number>` to the base name
    #[default]
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    Modified,
    Created,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatePosition {
    #[default]
    Prefix,
    Suffix,
}

/// Widest zero padding accepted. No filesystem allows a longer file name.
pub const MAX_PADDING: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Numbering {
    pub mode: NumberingMode,
    pub start: u64,
    pub padding: usize,
}

impl Numbering {
    /// Zero-padded number for the candidate at `index`.
    pub fn format(&self, index: usize) -> String {
        let number = self.start.saturating_add(index as u64);
        format!("{:0width$}", number, width = self.padding.min(MAX_PADDING))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStamp {
    pub source: DateSource,
    pub position: DatePosition,
}

#[derive(Debug)]
pub struct SearchReplace {
    pub pattern: Box<dyn NamePattern>,
    pub replacement: String,
}

/// Raw, unvalidated rule configuration as it arrives from the CLI or config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub search: Option<String>,
    pub replace: Option<String>,
    pub number: bool,
    pub number_mode: NumberingMode,
    pub number_start: u64,
    pub number_padding: usize,
    pub date: Option<DateSource>,
    pub date_position: DatePosition,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            suffix: None,
            search: None,
            replace: None,
            number: false,
            number_mode: NumberingMode::Append,
            number_start: 1,
            number_padding: 3,
            date: None,
            date_position: DatePosition::Prefix,
        }
    }
}

/// Validated, immutable set of transformations applied to every candidate.
///
/// Application order is fixed: search/replace, then numbering, then date,
/// then the prefix/suffix affixes.
#[derive(Debug, Default)]
pub struct RuleSet {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub search: Option<SearchReplace>,
    pub numbering: Option<Numbering>,
    pub date: Option<DateStamp>,
}

impl RuleSet {
    pub fn from_options(options: &RuleOptions) -> Result<Self, ConfigError> {
        let search = match options.search.as_deref() {
            Some(pattern) => Some(SearchReplace {
                pattern: Box::new(build_pattern(pattern)?),
                replacement: options.replace.clone().unwrap_or_default(),
            }),
            None => {
                if options.replace.is_some() {
                    tracing::warn!("--replace has no effect without --search");
                }
                None
            },
        };

        if options.number && options.number_padding > MAX_PADDING {
            return Err(ConfigError::InvalidPadding {
                padding: options.number_padding,
                max: MAX_PADDING,
            });
        }

        let rules = Self {
            prefix: options.prefix.clone().filter(|p| !p.is_empty()),
            suffix: options.suffix.clone().filter(|s| !s.is_empty()),
            search,
            numbering: options.number.then_some(Numbering {
                mode: options.number_mode,
                start: options.number_start,
                padding: options.number_padding,
            }),
            date: options.date.map(|source| DateStamp {
                source,
                position: options.date_position,
            }),
        };

        if rules.is_empty() {
            return Err(ConfigError::NoRules);
        }

        Ok(rules)
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.suffix.is_none()
            && self.search.is_none()
            && self.numbering.is_none()
            && self.date.is_none()
    }

    pub fn with_search(mut self, pattern: impl NamePattern + 'static, replacement: &str) -> Self {
        self.search = Some(SearchReplace {
            pattern: Box::new(pattern),
            replacement: replacement.to_string(),
        });
        self
    }
}

impl fmt::Display for NumberingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Append => write!(f, "append"),
        }
    }
}

impl fmt::Display for DateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Modified => write!(f, "modified"),
            Self::Created => write!(f, "created"),
            Self::Current => write!(f, "current"),
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(search) = &self.search {
            parts.push(format!(
                "replace /{}/ with '{}'",
                search.pattern.as_str(),
                search.replacement
            ));
        }
        if let Some(numbering) = &self.numbering {
            parts.push(format!(
                "number {} from {} (width {})",
                numbering.mode, numbering.start, numbering.padding
            ));
        }
        if let Some(date) = &self.date {
            let position = match date.position {
                DatePosition::Prefix => "prefix",
                DatePosition::Suffix => "suffix",
            };
            parts.push(format!("{} date as {}", date.source, position));
        }
        if let Some(prefix) = &self.prefix {
            parts.push(format!("prefix '{}'", prefix));
        }
        if let Some(suffix) = &self.suffix {
            parts.push(format!("suffix '{}'", suffix));
        }
        write!(f, "{}", parts.join(", "))
    }
}
