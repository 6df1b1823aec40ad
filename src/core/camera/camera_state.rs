use log::debug;

use crate::core::camera::limits::{
    CameraLimits, DEFAULT_ITERATIONS, DEFAULT_SCALE, DEFAULT_WORKERS, ITERATIONS_MULTIPLIER,
    SCALE_MULTIPLIER, WORKERS_MULTIPLIER,
};
use crate::core::camera::viewport::Viewport;
use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::perfect_square::{integer_sqrt, nearest_square_side};
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

/// Where the camera looks and how hard it works.
///
/// Every adjustment clamps into [`CameraLimits`] and reports whether the value
/// actually changed, so callers can skip work at the boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    center: Complex,
    scale: u64,
    max_iterations: u32,
    workers: u32,
    fractal: FractalKind,
    limits: CameraLimits,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(
            CameraLimits::default(),
            Complex::ZERO,
            DEFAULT_SCALE,
            DEFAULT_ITERATIONS,
            DEFAULT_WORKERS,
        )
    }
}

impl CameraState {
    /// Builds a camera, clamping each setting and rounding `workers` to the
    /// nearest allowed perfect square.
    #[must_use]
    pub fn new(
        limits: CameraLimits,
        center: Complex,
        scale: u64,
        max_iterations: u32,
        workers: u32,
    ) -> Self {
        let mut camera = Self {
            center,
            scale: limits.clamp_scale(scale),
            max_iterations: limits.clamp_iterations(max_iterations),
            workers: 1,
            fractal: FractalKind::default(),
            limits,
        };
        camera.workers = camera.clamp_worker_side(nearest_square_side(workers)).pow(2);
        camera
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> u64 {
        self.scale
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn workers(&self) -> u32 {
        self.workers
    }

    #[must_use]
    pub fn fractal(&self) -> FractalKind {
        self.fractal
    }

    #[must_use]
    pub fn limits(&self) -> &CameraLimits {
        &self.limits
    }

    #[must_use]
    pub fn viewport(&self, width: u32, height: u32) -> Viewport {
        Viewport {
            center: self.center,
            scale: self.scale,
            width,
            height,
            max_iterations: self.max_iterations,
            fractal: self.fractal,
        }
    }

    /// Moves the center by `(dx, dy) × pan_step / scale`; positive `dy` moves up.
    pub fn pan(&mut self, dx: i32, dy: i32) -> bool {
        if dx == 0 && dy == 0 {
            return false;
        }

        let step = f64::from(self.limits.pan_step) / self.scale as f64;
        self.center = self.center + Complex::new(f64::from(dx) * step, f64::from(dy) * step);
        debug!("camera center -> ({}, {})", self.center.real, self.center.imag);
        true
    }

    /// Centers the camera on the plane point under `pixel`.
    pub fn recenter_on(&mut self, pixel: Point, width: u32, height: u32) -> bool {
        let target = pixel_to_complex_coords(pixel, width, height, self.center, self.scale);
        if target == self.center {
            return false;
        }

        self.center = target;
        debug!("camera recentered on ({}, {})", target.real, target.imag);
        true
    }

    pub fn zoom(&mut self, signum: i32) -> bool {
        let scale = match signum.signum() {
            1 => self.scale.saturating_mul(SCALE_MULTIPLIER),
            -1 => self.scale / SCALE_MULTIPLIER,
            _ => self.scale,
        };

        self.replace_scale(self.limits.clamp_scale(scale))
    }

    pub fn adjust_iterations(&mut self, signum: i32) -> bool {
        let iterations = match signum.signum() {
            1 => self.max_iterations.saturating_mul(ITERATIONS_MULTIPLIER),
            -1 => self.max_iterations / ITERATIONS_MULTIPLIER,
            _ => self.max_iterations,
        };
        let iterations = self.limits.clamp_iterations(iterations);

        if iterations == self.max_iterations {
            return false;
        }

        debug!("iterations {} -> {}", self.max_iterations, iterations);
        self.max_iterations = iterations;
        true
    }

    /// Multiplies or divides the worker count by four.
    ///
    /// Works on the tile side `k = √workers`: increasing doubles `k`,
    /// decreasing halves it rounding half up, then `k` is clamped to the
    /// limits. The result is always `k²`.
    pub fn adjust_workers(&mut self, signum: i32) -> bool {
        let side = integer_sqrt(self.workers);
        let side_multiplier = integer_sqrt(WORKERS_MULTIPLIER);

        let side = match signum.signum() {
            1 => side.saturating_mul(side_multiplier),
            -1 => side.div_ceil(side_multiplier),
            _ => side,
        };
        let workers = self.clamp_worker_side(side).pow(2);

        if workers == self.workers {
            return false;
        }

        debug!("workers {} -> {}", self.workers, workers);
        self.workers = workers;
        true
    }

    pub fn switch_fractal(&mut self, signum: i32) -> bool {
        let fractal = self.fractal.cycle(signum);
        if fractal == self.fractal {
            return false;
        }

        debug!("fractal {} -> {}", self.fractal, fractal);
        self.fractal = fractal;
        true
    }

    fn replace_scale(&mut self, scale: u64) -> bool {
        if scale == self.scale {
            return false;
        }

        debug!("scale {} -> {}", self.scale, scale);
        self.scale = scale;
        true
    }

    fn clamp_worker_side(&self, side: u32) -> u32 {
        let min_side = nearest_square_side(self.limits.min_workers);
        let max_side = integer_sqrt(self.limits.max_workers).max(min_side);

        side.clamp(min_side, max_side)
    }
}
