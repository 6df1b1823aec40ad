pub mod screenshot_path;
pub mod write_ppm;
