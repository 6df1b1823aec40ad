use crate::core::data::complex::Complex;
use crate::core::fractals::escape::{escape_time, Escape};

/// z₀ = 0, z ← (|Re z| + i|Im z|)² + c̄.
///
/// The imaginary part of `c` is negated so the ship is drawn upright with the
/// screen's downward rows.
#[must_use]
pub fn burning_ship(c: Complex, max_iterations: u32) -> Escape {
    let c = Complex::new(c.real, -c.imag);

    escape_time(Complex::ZERO, max_iterations, |z| z.abs_components().square() + c)
}
