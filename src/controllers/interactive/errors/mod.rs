pub mod dispatcher;
pub mod frame_driver;
pub mod render;
