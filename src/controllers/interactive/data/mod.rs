pub mod frame_data;
pub mod viewer_config;
