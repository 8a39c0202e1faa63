use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Best-effort creation time of a file.
///
/// Uses the real birth time where the platform records one (macOS, Windows,
/// Linux with statx). Otherwise falls back to the inode change time on Unix
/// and to the modification time elsewhere.
pub fn best_effort_created(metadata: &Metadata) -> SystemTime {
    if let Ok(created) = metadata.created() {
        return created;
    }
    change_time(metadata)
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> SystemTime {
    use std::os::unix::fs::MetadataExt;

    let secs = metadata.ctime();
    let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
    if secs >= 0 {
        UNIX_EPOCH + Duration::new(secs.unsigned_abs(), nanos)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

#[cfg(not(unix))]
fn change_time(metadata: &Metadata) -> SystemTime {
    metadata.modified().unwrap_or(UNIX_EPOCH)
}

/// Format a timestamp as `YYYYMMDD` in local time.
pub fn date_stamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y%m%d").to_string()
}
