use std::path::PathBuf;

use crate::core::camera::camera_state::CameraState;
use crate::core::camera::limits::{
    CameraLimits, DEFAULT_ITERATIONS, DEFAULT_SCALE, DEFAULT_WORKERS,
};
use crate::core::data::complex::Complex;

pub const DEFAULT_WIDTH: u32 = 768;
pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

/// Startup settings for a viewer session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    pub center: Complex,
    pub scale: u64,
    pub max_iterations: u32,
    pub workers: u32,
    pub limits: CameraLimits,
    pub screenshot_dir: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            center: Complex::ZERO,
            scale: DEFAULT_SCALE,
            max_iterations: DEFAULT_ITERATIONS,
            workers: DEFAULT_WORKERS,
            limits: CameraLimits::default(),
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }
}

impl ViewerConfig {
    /// Initial camera; out-of-range settings are clamped.
    #[must_use]
    pub fn camera(&self) -> CameraState {
        CameraState::new(
            self.limits,
            self.center,
            self.scale,
            self.max_iterations,
            self.workers,
        )
    }
}
