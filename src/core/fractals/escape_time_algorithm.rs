use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::camera::viewport::Viewport;
use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use crate::core::fractals::colour_mapping::smooth_gradient::SmoothGradient;

/// Pixel → colour for one dispatch generation.
///
/// Holds a frozen copy of the viewport, so camera changes made while workers
/// run never leak into the generation that is already in flight.
#[derive(Debug, Clone, Copy)]
pub struct EscapeTimeAlgorithm {
    viewport: Viewport,
    gradient: SmoothGradient,
}

impl EscapeTimeAlgorithm {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gradient: SmoothGradient::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl FractalAlgorithm for EscapeTimeAlgorithm {
    fn compute(&self, pixel: Point) -> Colour {
        let c = self.viewport.pixel_to_plane(pixel);
        let max_iterations = self.viewport.max_iterations;
        let escape = self.viewport.fractal.evaluate(c, max_iterations);

        self.gradient.map(&escape, max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;
    use crate::core::fractals::colour_mapping::smooth_gradient::IN_SET_COLOUR;
    use crate::core::fractals::fractal_kinds::FractalKind;

    fn viewport(center: Complex, scale: u64) -> Viewport {
        Viewport {
            center,
            scale,
            width: 4,
            height: 4,
            max_iterations: 64,
            fractal: FractalKind::Mandelbrot,
        }
    }

    #[test]
    fn center_pixel_at_origin_is_in_set() {
        let algorithm = EscapeTimeAlgorithm::new(viewport(Complex::ZERO, 1));

        assert_eq!(algorithm.compute(Point { x: 2, y: 2 }), IN_SET_COLOUR);
    }

    #[test]
    fn far_corner_escapes() {
        let algorithm = EscapeTimeAlgorithm::new(viewport(Complex::new(10.0, 10.0), 1));

        assert_ne!(algorithm.compute(Point { x: 0, y: 0 }), IN_SET_COLOUR);
    }
}
