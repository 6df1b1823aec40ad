//! Windowed viewer: winit for the window and input, pixels for the
//! framebuffer, egui for the debug overlay.

pub mod app;
pub mod commands;
pub mod events;
pub mod keymap;
