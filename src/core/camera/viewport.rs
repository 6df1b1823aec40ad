use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::fractals::fractal_kinds::FractalKind;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

/// Immutable copy of the camera taken when a generation is dispatched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Complex,
    pub scale: u64,
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub fractal: FractalKind,
}

impl Viewport {
    #[must_use]
    pub fn pixel_to_plane(&self, pixel: Point) -> Complex {
        pixel_to_complex_coords(pixel, self.width, self.height, self.center, self.scale)
    }

    /// Plane units covered by one pixel.
    #[must_use]
    pub fn pixel_size(&self) -> f64 {
        1.0 / self.scale.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_to_plane_uses_viewport_geometry() {
        let viewport = Viewport {
            center: Complex::new(1.0, 1.0),
            scale: 4,
            width: 8,
            height: 8,
            max_iterations: 10,
            fractal: FractalKind::Mandelbrot,
        };

        assert_eq!(viewport.pixel_to_plane(Point { x: 4, y: 4 }), Complex::new(1.0, 1.0));
        assert_eq!(viewport.pixel_to_plane(Point { x: 0, y: 0 }), Complex::new(0.0, 2.0));
        assert_eq!(viewport.pixel_size(), 0.25);
    }
}
