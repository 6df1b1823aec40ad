use std::time::Duration;

use crate::core::camera::camera_state::CameraState;
use crate::core::data::frame_snapshot::FrameSnapshot;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub snapshot: FrameSnapshot,
    pub render_duration: Duration,
    /// Camera the frame was rendered with, for overlays.
    pub camera: CameraState,
}
