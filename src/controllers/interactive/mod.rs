//! Interactive viewer: input actions in, rendered frames out.
//!
//! A coordination thread owns the [`FrameDriver`](frame_driver::FrameDriver),
//! which drives the [`TileDispatcher`](dispatcher::TileDispatcher) once per
//! frame. Results leave through the presenter port.

pub mod commands;
mod controller;
pub mod data;
pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod frame_driver;
pub mod ports;

pub use controller::InteractiveController;
