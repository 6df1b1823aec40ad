use crate::core::data::complex::Complex;
use crate::core::fractals::escape::{escape_time, Escape};

/// z₀ = 0, z ← z² + c.
#[must_use]
pub fn mandelbrot(c: Complex, max_iterations: u32) -> Escape {
    escape_time(Complex::ZERO, max_iterations, |z| z.square() + c)
}
