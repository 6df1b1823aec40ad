pub mod camera_state;
pub mod limits;
pub mod viewport;
