use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render::RenderError;
use crate::core::data::frame_snapshot::FrameSnapshot;

#[derive(Debug)]
pub enum RenderEvent {
    Frame(FrameData),
    Error(RenderError),
    /// A complete frame the user asked to keep.
    Screenshot(FrameSnapshot),
    FullscreenRequested,
}
