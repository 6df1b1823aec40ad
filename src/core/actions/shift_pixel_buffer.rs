use crate::core::data::colour::UNRESOLVED;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Integer pixel offset applied to buffer content: after the shift, the cell
/// at `(x, y)` holds what used to be at `(x - dx, y - dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelShift {
    pub dx: i32,
    pub dy: i32,
}

impl PixelShift {
    pub const NONE: Self = Self { dx: 0, dy: 0 };

    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Content offset for a camera move of `delta` plane units.
    ///
    /// Moving the camera right slides the picture left, and moving it up
    /// slides the picture down (screen rows grow downward).
    #[must_use]
    pub fn from_camera_delta(delta: Complex, scale: u64) -> Self {
        let scale = scale.max(1) as f64;

        Self {
            dx: -(delta.real * scale).round() as i32,
            dy: (delta.imag * scale).round() as i32,
        }
    }

    /// The camera delta this shift accounts for exactly.
    #[must_use]
    pub fn camera_delta(&self, scale: u64) -> Complex {
        let scale = scale.max(1) as f64;

        Complex::new(-f64::from(self.dx) / scale, f64::from(self.dy) / scale)
    }

    /// Largest rounding error, in pixels, between `delta` and this shift.
    #[must_use]
    pub fn residual_pixels(&self, delta: Complex, scale: u64) -> f64 {
        let remainder = delta - self.camera_delta(scale);
        let scale = scale.max(1) as f64;

        (remainder.real * scale)
            .abs()
            .max((remainder.imag * scale).abs())
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// True when no cell of a `width`×`height` buffer keeps a source.
    #[must_use]
    pub fn exceeds(&self, width: u32, height: u32) -> bool {
        i64::from(self.dx).unsigned_abs() >= u64::from(width)
            || i64::from(self.dy).unsigned_abs() >= u64::from(height)
    }
}

fn traversal(len: u32, delta: i32) -> Vec<i64> {
    let forward = 0..i64::from(len);

    if delta > 0 {
        forward.rev().collect()
    } else {
        forward.collect()
    }
}

/// Relocates resolved cells in place and marks exposed cells unresolved.
///
/// Each axis is walked away from the direction of motion so every source cell
/// is read before anything overwrites it.
pub fn shift_pixel_buffer(buffer: &mut PixelBuffer, shift: PixelShift) {
    if shift.is_none() {
        return;
    }

    let width = buffer.width();
    let height = buffer.height();

    if shift.exceeds(width, height) {
        buffer.invalidate_all();
        return;
    }

    let row_len = i64::from(width);
    let (dx, dy) = (i64::from(shift.dx), i64::from(shift.dy));
    let columns = traversal(width, shift.dx);

    for y in traversal(height, shift.dy) {
        let source_y = y - dy;

        for &x in &columns {
            let source_x = x - dx;
            let in_bounds =
                (0..row_len).contains(&source_x) && (0..i64::from(height)).contains(&source_y);

            let value = if in_bounds {
                *buffer.cell_mut((source_y * row_len + source_x) as usize)
            } else {
                UNRESOLVED
            };

            *buffer.cell_mut((y * row_len + x) as usize) = value;
        }
    }
}
