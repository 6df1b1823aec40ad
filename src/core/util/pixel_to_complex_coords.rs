use crate::core::data::complex::Complex;
use crate::core::data::point::Point;

/// Maps a pixel to the plane: `center + ((px − W/2), (H/2 − py)) / scale`.
///
/// Screen rows grow downward while the imaginary axis grows upward, hence the
/// inverted y term. `W/2` and `H/2` use integer division.
#[must_use]
pub fn pixel_to_complex_coords(
    pixel: Point,
    width: u32,
    height: u32,
    center: Complex,
    scale: u64,
) -> Complex {
    let scale = scale.max(1) as f64;
    let relative_x = i64::from(pixel.x) - i64::from(width / 2);
    let relative_y = i64::from(height / 2) - i64::from(pixel.y);

    Complex {
        real: center.real + relative_x as f64 / scale,
        imag: center.imag + relative_y as f64 / scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_pixel_maps_to_center() {
        let center = Complex::new(-0.5, 0.25);

        let result = pixel_to_complex_coords(Point { x: 50, y: 50 }, 100, 100, center, 200);

        assert_eq!(result, center);
    }

    #[test]
    fn test_top_left_is_negative_real_positive_imag() {
        let result = pixel_to_complex_coords(Point { x: 0, y: 0 }, 100, 100, Complex::ZERO, 50);

        assert_eq!(result, Complex::new(-1.0, 1.0));
    }

    #[test]
    fn test_bottom_right() {
        let result = pixel_to_complex_coords(Point { x: 99, y: 99 }, 100, 100, Complex::ZERO, 1);

        assert_eq!(result, Complex::new(49.0, -49.0));
    }

    #[test]
    fn test_y_axis_is_inverted() {
        let above = pixel_to_complex_coords(Point { x: 2, y: 0 }, 4, 4, Complex::ZERO, 1);
        let below = pixel_to_complex_coords(Point { x: 2, y: 3 }, 4, 4, Complex::ZERO, 1);

        assert!(above.imag > below.imag);
        assert_eq!(above.real, below.real);
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let result = pixel_to_complex_coords(Point { x: 3, y: 2 }, 4, 4, Complex::ZERO, 0);

        assert_eq!(result, Complex::new(1.0, 0.0));
    }
}
