#![no_main]

use batchren_core::{build_pattern, split_name, transform_name, Candidate, RuleSet, RunClock};
use libfuzzer_sys::fuzz_target;
use std::path::PathBuf;
use std::time::SystemTime;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut lines = input.lines().map(|s| s.chars().take(100).collect::<String>());

    let (Some(file_name), Some(search)) = (lines.next(), lines.next()) else {
        return;
    };
    let replacement = lines.next().unwrap_or_default();

    let Ok(pattern) = build_pattern(&search) else {
        return;
    };
    let rules = RuleSet::default().with_search(pattern, &replacement);

    let (base, ext) = split_name(&file_name);
    let candidate = Candidate {
        path: PathBuf::from("/fuzz").join(&file_name),
        base_name: base.to_string(),
        extension: ext.to_string(),
        modified: SystemTime::UNIX_EPOCH,
        created: SystemTime::UNIX_EPOCH,
        index: 0,
    };

    let transformed = transform_name(&candidate, &rules, &RunClock::at(SystemTime::UNIX_EPOCH));
    assert_eq!(transformed.extension, candidate.extension);
});
