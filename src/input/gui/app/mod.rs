pub mod crosshair;
pub mod gui_app;
pub mod ports;
pub mod state;
