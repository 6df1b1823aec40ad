use crate::core::data::complex::Complex;

/// Bailout radius squared. Comparing |z|² against it avoids a square root per
/// iteration.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Result of iterating one plane coordinate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Escape {
    /// Steps taken before |z|² exceeded the bailout, or the cap if it never did.
    pub iterations: u32,
    /// The orbit value when iteration stopped.
    pub z: Complex,
}

impl Escape {
    #[must_use]
    pub fn escaped(&self, max_iterations: u32) -> bool {
        self.iterations < max_iterations
    }
}

/// Iterates `z ← step(z)` from `start` until |z|² > 4 or `max_iterations`
/// steps have run.
#[inline]
pub fn escape_time<F>(start: Complex, max_iterations: u32, step: F) -> Escape
where
    F: Fn(Complex) -> Complex,
{
    let mut z = start;

    for iteration in 0..max_iterations {
        z = step(z);

        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            return Escape { iterations: iteration, z };
        }
    }

    Escape {
        iterations: max_iterations,
        z,
    }
}
