use std::path::Path;

use crate::core::data::frame_snapshot::FrameSnapshot;

/// Persists a finished frame, e.g. for screenshots.
pub trait FilePresenterPort {
    fn present(&self, snapshot: &FrameSnapshot, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
