use crate::core::data::complex::Complex;
use crate::core::fractals::escape::{escape_time, Escape};

/// The fixed parameter of the filled Julia set that is rendered.
pub const JULIA_PARAMETER: Complex = Complex::new(-0.70176, -0.3842);

/// z₀ = c, z ← z² + k with `k` fixed at [`JULIA_PARAMETER`].
#[must_use]
pub fn julia(c: Complex, max_iterations: u32) -> Escape {
    escape_time(c, max_iterations, |z| z.square() + JULIA_PARAMETER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_points_escape_on_first_step() {
        assert_eq!(julia(Complex::new(4.0, 0.0), 100).iterations, 0);
    }

    #[test]
    fn start_point_is_the_pixel_coordinate() {
        let escape = julia(Complex::ZERO, 1);

        // One step from 0 lands on k itself, which is inside the bailout.
        assert_eq!(escape.iterations, 1);
        assert_eq!(escape.z, JULIA_PARAMETER);
    }
}
