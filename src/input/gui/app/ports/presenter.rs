use std::sync::Arc;
use std::time::Duration;

use egui::Context as EguiContext;

use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::camera::camera_state::CameraState;
use crate::core::data::frame_snapshot::FrameSnapshot;

/// What the presenter tells the app after taking in controller events.
#[derive(Debug)]
pub enum PresenterNotice {
    Presented {
        generation: u64,
        render_duration: Duration,
        camera: CameraState,
    },
    Screenshot(FrameSnapshot),
    FullscreenRequested,
    Error(RenderError),
}

pub trait GuiPresenterPort {
    /// The sink the interactive controller publishes into.
    fn share_adapter(&self) -> Arc<dyn InteractiveControllerPresenterPort>;

    /// Takes in everything published since the last call.
    fn sync(&mut self) -> Vec<PresenterNotice>;

    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error>;

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError>;
}
