pub const DEFAULT_SCALE: u64 = 128;
pub const DEFAULT_ITERATIONS: u32 = 128;
pub const DEFAULT_WORKERS: u32 = 4;

pub const SCALE_MULTIPLIER: u64 = 2;
pub const ITERATIONS_MULTIPLIER: u32 = 2;
pub const WORKERS_MULTIPLIER: u32 = 4;

/// Bounds and step sizes for every camera adjustment.
///
/// Values outside these ranges are clamped, never reported as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraLimits {
    pub min_scale: u64,
    pub max_scale: u64,
    pub min_iterations: u32,
    pub max_iterations: u32,
    /// Must be a perfect square.
    pub min_workers: u32,
    /// Must be a perfect square.
    pub max_workers: u32,
    /// Pixels moved per unit of pan input.
    pub pan_step: u32,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_scale: 1,
            max_scale: 1 << 48,
            min_iterations: 1,
            max_iterations: 1 << 16,
            min_workers: 1,
            max_workers: 256,
            pan_step: 16,
        }
    }
}

impl CameraLimits {
    #[must_use]
    pub fn clamp_scale(&self, scale: u64) -> u64 {
        let min = self.min_scale.max(1);
        scale.clamp(min, self.max_scale.max(min))
    }

    #[must_use]
    pub fn clamp_iterations(&self, iterations: u32) -> u32 {
        iterations.clamp(self.min_iterations, self.max_iterations.max(self.min_iterations))
    }
}
