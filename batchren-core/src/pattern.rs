use crate::error::ConfigError;
use regex::Regex;
use std::borrow::Cow;

/// Anything that can rewrite a base name by replacing every match of itself.
///
/// Implementations must replace non-overlapping matches left to right in a
/// single scan, so an empty match can never cause repeated replacement.
pub trait NamePattern: std::fmt::Debug + Send + Sync {
    fn replace_all<'a>(&self, name: &'a str, replacement: &str) -> Cow<'a, str>;

    /// Source text of the pattern, used for display.
    fn as_str(&self) -> &str;
}

impl NamePattern for Regex {
    fn replace_all<'a>(&self, name: &'a str, replacement: &str) -> Cow<'a, str> {
        Self::replace_all(self, name, replacement)
    }

    fn as_str(&self) -> &str {
        Self::as_str(self)
    }
}

/// Compile a user supplied search pattern.
pub fn build_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_digits() {
        let re = build_pattern(r"\d+").unwrap();
        assert_eq!(NamePattern::replace_all(&re, "file123", ""), "file");
        assert_eq!(NamePattern::replace_all(&re, "a1b22c333", "#"), "a#b#c#");
    }

    #[test]
    fn test_empty_match_terminates() {
        let re = build_pattern("x*").unwrap();
        // Empty matches at every position are replaced exactly once
        assert_eq!(NamePattern::replace_all(&re, "ab", "-"), "-a-b-");
    }

    #[test]
    fn test_capture_groups() {
        let re = build_pattern(r"(\w+)-(\w+)").unwrap();
        assert_eq!(NamePattern::replace_all(&re, "left-right", "$2-$1"), "right-left");
    }

    #[test]
    fn test_no_match_borrows() {
        let re = build_pattern("zzz").unwrap();
        assert!(matches!(
            NamePattern::replace_all(&re, "photo", "x"),
            Cow::Borrowed("photo")
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = build_pattern("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
