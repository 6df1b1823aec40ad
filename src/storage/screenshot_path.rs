use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SCREENSHOT_EXTENSION: &str = "ppm";

/// `dir/<unix seconds>.ppm`. Clocks before the epoch count as zero.
#[must_use]
pub fn screenshot_path(dir: impl AsRef<Path>, taken_at: SystemTime) -> PathBuf {
    let seconds = taken_at
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);

    dir.as_ref()
        .join(seconds.to_string())
        .with_extension(SCREENSHOT_EXTENSION)
}
