pub mod controllers;
pub mod core;
#[cfg(feature = "gui")]
pub mod input;
pub mod presenters;
pub mod storage;

pub use controllers::cli::cli_controller::CliController;
pub use controllers::interactive::InteractiveController;
pub use controllers::interactive::commands::UserAction;
pub use controllers::interactive::data::frame_data::FrameData;
pub use controllers::interactive::data::viewer_config::ViewerConfig;
pub use controllers::interactive::dispatcher::TileDispatcher;
pub use controllers::interactive::events::render::RenderEvent;
pub use controllers::interactive::frame_driver::FrameDriver;
pub use controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
pub use crate::core::actions::cancellation::NeverCancel;
pub use crate::core::actions::shift_pixel_buffer::{PixelShift, shift_pixel_buffer};
pub use crate::core::camera::camera_state::CameraState;
pub use crate::core::data::frame_snapshot::FrameSnapshot;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use presenters::file::ppm::PpmFilePresenter;
pub use storage::screenshot_path::screenshot_path;

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
