use crate::rules::{DatePosition, DateSource, NumberingMode, RuleSet};
use crate::scanner::Candidate;
use crate::timestamps::date_stamp;
use std::time::SystemTime;

/// Split a file name into base name and extension (with its dot).
///
/// A leading dot does not start an extension, so `.bashrc` has no extension.
pub fn split_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}

/// Wall-clock instant captured once when a run starts.
#[derive(Debug, Clone, Copy)]
pub struct RunClock {
    started: SystemTime,
}

impl RunClock {
    pub fn now() -> Self {
        Self {
            started: SystemTime::now(),
        }
    }

    pub fn at(started: SystemTime) -> Self {
        Self { started }
    }

    pub fn started(&self) -> SystemTime {
        self.started
    }
}

/// Result of transforming one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub base_name: String,
    pub extension: String,
    changed: bool,
}

impl Transformed {
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    /// True when every rule left the name exactly as it was.
    pub fn is_noop(&self) -> bool {
        !self.changed
    }
}

/// Compute the new name for a candidate. Pure: no filesystem access.
pub fn transform_name(candidate: &Candidate, rules: &RuleSet, clock: &RunClock) -> Transformed {
    let mut name = candidate.base_name.clone();

    if let Some(search) = &rules.search {
        name = search
            .pattern
            .replace_all(&name, &search.replacement)
            .into_owned();
    }

    if let Some(numbering) = &rules.numbering {
        let number = numbering.format(candidate.index);
        name = match numbering.mode {
            NumberingMode::Sequential => number,
            NumberingMode::Append => format!("{}_{}", name, number),
        };
    }

    if let Some(date) = &rules.date {
        let time = match date.source {
            DateSource::Modified => candidate.modified,
            DateSource::Created => candidate.created,
            DateSource::Current => clock.started(),
        };
        let stamp = date_stamp(time);
        name = match date.position {
            DatePosition::Prefix => format!("{}_{}", stamp, name),
            DatePosition::Suffix => format!("{}_{}", name, stamp),
        };
    }

    if let Some(prefix) = &rules.prefix {
        name.insert_str(0, prefix);
    }
    if let Some(suffix) = &rules.suffix {
        name.push_str(suffix);
    }

    let changed = name != candidate.base_name;
    Transformed {
        base_name: name,
        extension: candidate.extension.clone(),
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::build_pattern;
    use crate::rules::{DateStamp, Numbering};
    use chrono::{Local, TimeZone};
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn candidate(file_name: &str, index: usize) -> Candidate {
        let (base, ext) = split_name(file_name);
        let modified = Local.with_ymd_and_hms(2023, 7, 4, 10, 0, 0).unwrap();
        let created = Local.with_ymd_and_hms(2022, 1, 2, 10, 0, 0).unwrap();
        Candidate {
            path: PathBuf::from("/photos").join(file_name),
            base_name: base.to_string(),
            extension: ext.to_string(),
            modified: modified.into(),
            created: created.into(),
            index,
        }
    }

    fn clock() -> RunClock {
        RunClock::at(Local.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap().into())
    }

    fn numbering(mode: NumberingMode) -> Option<Numbering> {
        Some(Numbering {
            mode,
            start: 1,
            padding: 3,
        })
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("photo.jpg"), ("photo", ".jpg"));
        assert_eq!(split_name("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_name("README"), ("README", ""));
        assert_eq!(split_name(".bashrc"), (".bashrc", ""));
        assert_eq!(split_name(".config.toml"), (".config", ".toml"));
    }

    #[test]
    fn test_search_replace_digits() {
        let rules = RuleSet::default().with_search(build_pattern(r"\d+").unwrap(), "");
        let result = transform_name(&candidate("file123.txt", 0), &rules, &clock());
        assert_eq!(result.file_name(), "file.txt");
    }

    #[test]
    fn test_search_replace_scoped_to_base_name() {
        let rules = RuleSet::default().with_search(build_pattern("txt").unwrap(), "md");
        let result = transform_name(&candidate("txt_notes.txt", 0), &rules, &clock());
        assert_eq!(result.file_name(), "md_notes.txt");
    }

    #[test]
    fn test_sequential_numbering() {
        let rules = RuleSet {
            numbering: numbering(NumberingMode::Sequential),
            ..Default::default()
        };
        let result = transform_name(&candidate("holiday.png", 0), &rules, &clock());
        assert_eq!(result.file_name(), "001.png");
        let result = transform_name(&candidate("holiday.png", 9), &rules, &clock());
        assert_eq!(result.file_name(), "010.png");
    }

    #[test]
    fn test_append_numbering() {
        let rules = RuleSet {
            numbering: numbering(NumberingMode::Append),
            ..Default::default()
        };
        let result = transform_name(&candidate("photo.jpg", 0), &rules, &clock());
        assert_eq!(result.file_name(), "photo_001.jpg");
    }

    #[test]
    fn test_date_sources() {
        let mut rules = RuleSet {
            date: Some(DateStamp {
                source: DateSource::Modified,
                position: DatePosition::Prefix,
            }),
            ..Default::default()
        };
        let c = candidate("scan.pdf", 0);
        assert_eq!(transform_name(&c, &rules, &clock()).file_name(), "20230704_scan.pdf");

        rules.date = Some(DateStamp {
            source: DateSource::Created,
            position: DatePosition::Suffix,
        });
        assert_eq!(transform_name(&c, &rules, &clock()).file_name(), "scan_20220102.pdf");

        rules.date = Some(DateStamp {
            source: DateSource::Current,
            position: DatePosition::Prefix,
        });
        assert_eq!(transform_name(&c, &rules, &clock()).file_name(), "20251231_scan.pdf");
    }

    #[test]
    fn test_affixes_wrap_everything() {
        let rules = RuleSet {
            prefix: Some("trip_".to_string()),
            suffix: Some("_final".to_string()),
            numbering: numbering(NumberingMode::Append),
            date: Some(DateStamp {
                source: DateSource::Modified,
                position: DatePosition::Prefix,
            }),
            ..Default::default()
        }
        .with_search(build_pattern("IMG").unwrap(), "img");

        let result = transform_name(&candidate("IMG_4.jpeg", 2), &rules, &clock());
        assert_eq!(result.file_name(), "trip_20230704_img_4_003_final.jpeg");
    }

    #[test]
    fn test_sequential_numbering_keeps_affixes() {
        let rules = RuleSet {
            prefix: Some("p".to_string()),
            numbering: numbering(NumberingMode::Sequential),
            ..Default::default()
        };
        let result = transform_name(&candidate("whatever.txt", 0), &rules, &clock());
        assert_eq!(result.file_name(), "p001.txt");
    }

    #[test]
    fn test_noop_reported() {
        let rules = RuleSet::default().with_search(build_pattern("zzz").unwrap(), "y");
        let result = transform_name(&candidate("photo.jpg", 0), &rules, &clock());
        assert!(result.is_noop());
        assert_eq!(result.file_name(), "photo.jpg");

        let rules = RuleSet::default().with_search(build_pattern("o").unwrap(), "o");
        assert!(transform_name(&candidate("photo.jpg", 0), &rules, &clock()).is_noop());
    }

    #[test]
    fn test_dotfile_keeps_leading_dot() {
        let rules = RuleSet {
            suffix: Some("_old".to_string()),
            ..Default::default()
        };
        let result = transform_name(&candidate(".bashrc", 0), &rules, &clock());
        assert_eq!(result.file_name(), ".bashrc_old");
    }

    proptest! {
        #[test]
        fn prop_transform_is_deterministic(
            base in "[a-zA-Z0-9_ -]{1,16}",
            ext in "(\\.[a-z]{1,4})?",
            index in 0usize..500,
        ) {
            let rules = RuleSet {
                prefix: Some("x".to_string()),
                numbering: numbering(NumberingMode::Append),
                ..Default::default()
            }
            .with_search(build_pattern("[aeiou]").unwrap(), "");
            let c = candidate(&format!("{}{}", base, ext), index);
            let first = transform_name(&c, &rules, &clock());
            let second = transform_name(&c, &rules, &clock());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_extension_preserved(
            base in "[a-z0-9]{1,12}",
            ext in "\\.[a-z]{1,4}",
            index in 0usize..50,
        ) {
            let rules = RuleSet {
                suffix: Some(".bak".to_string()),
                numbering: numbering(NumberingMode::Sequential),
                date: Some(DateStamp {
                    source: DateSource::Current,
                    position: DatePosition::Suffix,
                }),
                ..Default::default()
            }
            .with_search(build_pattern("[a-z]").unwrap(), ".");
            let file_name = format!("{}{}", base, ext);
            let result = transform_name(&candidate(&file_name, index), &rules, &clock());
            prop_assert_eq!(&result.extension, &ext);
            prop_assert!(result.file_name().ends_with(&ext));
        }
    }
}
