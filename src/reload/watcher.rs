//! Modification times and the debounce rule

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Source of file modification times
pub trait ModTimes {
    fn modified(&self, path: &Path) -> std::io::Result<SystemTime>;
}

/// Reads modification times from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsModTimes;

impl ModTimes for FsModTimes {
    fn modified(&self, path: &Path) -> std::io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }
}

/// A file is due for reload when it changed since `stored` and the change
/// is at least `debounce` old at `now`.
///
/// Modification times in the future never count as settled.
pub fn is_due(
    stored: Option<SystemTime>,
    modified: SystemTime,
    now: SystemTime,
    debounce: Duration,
) -> bool {
    let newer = stored.is_none_or(|previous| modified > previous);
    let settled = now
        .duration_since(modified)
        .is_ok_and(|age| age >= debounce);
    newer && settled
}
