use std::f64::consts::LN_2;

use crate::core::data::colour::Colour;
use crate::core::fractals::escape::Escape;

/// Anchor colours of the gradient, blended pairwise and wrapping at the end.
pub const PALETTE: [Colour; 6] = [
    Colour::from_rgb(0x00_00_FF),
    Colour::from_rgb(0xFF_00_00),
    Colour::from_rgb(0x00_FF_00),
    Colour::from_rgb(0xFF_FF_00),
    Colour::from_rgb(0x00_00_00),
    Colour::from_rgb(0xFF_FF_FF),
];

/// Colour of points that never escaped.
pub const IN_SET_COLOUR: Colour = Colour::BLACK;

/// Smoothed escape value `k + 1 − ln(ln|z|) / ln 2`.
///
/// `None` when |z| ≤ 1 (the double logarithm is undefined there) or when the
/// result is not finite.
#[must_use]
pub fn smooth_iterations(escape: &Escape) -> Option<f64> {
    let magnitude = escape.z.magnitude();

    if !(magnitude > 1.0) {
        return None;
    }

    let smooth = f64::from(escape.iterations) + 1.0 - magnitude.ln().ln() / LN_2;
    smooth.is_finite().then_some(smooth)
}

/// Piecewise-linear palette lookup for a fraction in `[0, 1]`.
#[must_use]
pub fn gradient(palette: &[Colour], fraction: f64) -> Colour {
    let len = palette.len();
    if len == 0 {
        return IN_SET_COLOUR;
    }

    let position = fraction.clamp(0.0, 1.0) * (len - 1) as f64;
    let low = position.floor();
    let low_index = (low as usize) % len;
    let high_index = (low_index + 1) % len;

    palette[low_index].lerp(palette[high_index], position - low)
}

/// Maps escape results to colours with a continuous (band-free) gradient.
#[derive(Debug, Clone, Copy)]
pub struct SmoothGradient {
    palette: &'static [Colour],
    in_set: Colour,
}

impl Default for SmoothGradient {
    fn default() -> Self {
        Self {
            palette: &PALETTE,
            in_set: IN_SET_COLOUR,
        }
    }
}

impl SmoothGradient {
    #[must_use]
    pub fn map(&self, escape: &Escape, max_iterations: u32) -> Colour {
        if escape.iterations >= max_iterations {
            return self.in_set;
        }

        match smooth_iterations(escape) {
            Some(smooth) => gradient(self.palette, smooth / f64::from(max_iterations.max(1))),
            None => self.in_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;

    fn escaped_at(iterations: u32, real: f64) -> Escape {
        Escape {
            iterations,
            z: Complex::new(real, 0.0),
        }
    }

    #[test]
    fn points_at_cap_get_in_set_colour() {
        let gradient = SmoothGradient::default();

        assert_eq!(gradient.map(&escaped_at(100, 0.1), 100), IN_SET_COLOUR);
        assert_eq!(gradient.map(&escaped_at(150, 9.0), 100), IN_SET_COLOUR);
    }

    #[test]
    fn zero_magnitude_falls_back_to_in_set_colour() {
        let gradient = SmoothGradient::default();

        assert_eq!(smooth_iterations(&escaped_at(3, 0.0)), None);
        assert_eq!(gradient.map(&escaped_at(3, 0.0), 100), IN_SET_COLOUR);
    }

    #[test]
    fn magnitude_of_one_falls_back_to_in_set_colour() {
        assert_eq!(smooth_iterations(&escaped_at(3, 1.0)), None);
    }

    #[test]
    fn nan_orbit_falls_back_to_in_set_colour() {
        let gradient = SmoothGradient::default();
        let escape = Escape {
            iterations: 2,
            z: Complex::new(f64::NAN, 1.0),
        };

        assert_eq!(gradient.map(&escape, 100), IN_SET_COLOUR);
    }

    #[test]
    fn smooth_value_is_continuous_in_magnitude() {
        // At |z| = e^2, ln(ln|z|) = ln 2, so the correction is exactly one.
        let escape = escaped_at(5, std::f64::consts::E.powi(2));

        let smooth = smooth_iterations(&escape).unwrap();

        assert!((smooth - 5.0).abs() < 1e-12);
    }

    #[test]
    fn gradient_endpoints_hit_anchor_colours() {
        assert_eq!(gradient(&PALETTE, 0.0), PALETTE[0]);
        assert_eq!(gradient(&PALETTE, 1.0), PALETTE[5]);
        assert_eq!(gradient(&PALETTE, 0.2), PALETTE[1]);
        assert_eq!(gradient(&PALETTE, 0.4), PALETTE[2]);
    }

    #[test]
    fn gradient_interpolates_between_neighbouring_anchors() {
        // Halfway between blue and red.
        let colour = gradient(&PALETTE, 0.1);

        assert_eq!(colour, Colour { r: 128, g: 0, b: 128 });
    }

    #[test]
    fn gradient_clamps_fraction() {
        assert_eq!(gradient(&PALETTE, -0.5), PALETTE[0]);
        assert_eq!(gradient(&PALETTE, 3.0), PALETTE[5]);
    }

    #[test]
    fn early_escape_is_near_first_anchor() {
        let gradient = SmoothGradient::default();

        let colour = gradient.map(&escaped_at(0, 3.0), 1000);

        assert_eq!(colour.g, 0);
        assert!(colour.b > 240);
        assert!(colour.r < 15);
    }

    #[test]
    fn rendered_colours_are_never_unresolved() {
        use crate::core::data::colour::UNRESOLVED;

        let gradient = SmoothGradient::default();
        for iterations in 0..64 {
            let colour = gradient.map(&escaped_at(iterations, 2.5), 64);
            assert_ne!(colour.to_argb(), UNRESOLVED);
        }
    }
}
