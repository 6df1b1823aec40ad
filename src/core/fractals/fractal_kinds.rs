use crate::core::data::complex::Complex;
use crate::core::fractals::burning_ship::algorithm::burning_ship;
use crate::core::fractals::escape::Escape;
use crate::core::fractals::julia::algorithm::julia;
use crate::core::fractals::mandelbrot::algorithm::mandelbrot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    BurningShip,
    Julia,
}

impl FractalKind {
    pub const ALL: &'static [Self] = &[Self::Mandelbrot, Self::BurningShip, Self::Julia];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::BurningShip => "Burning ship",
            Self::Julia => "Julia",
        }
    }

    /// Steps through [`Self::ALL`] cyclically; the sign of `signum` picks the
    /// direction and zero leaves the selection alone.
    #[must_use]
    pub fn cycle(self, signum: i32) -> Self {
        let len = Self::ALL.len() as i64;
        let index = Self::ALL.iter().position(|&kind| kind == self).unwrap_or(0) as i64;
        let next = (index + i64::from(signum.signum())).rem_euclid(len);

        Self::ALL[next as usize]
    }

    #[must_use]
    pub fn evaluate(self, c: Complex, max_iterations: u32) -> Escape {
        match self {
            Self::Mandelbrot => mandelbrot(c, max_iterations),
            Self::BurningShip => burning_ship(c, max_iterations),
            Self::Julia => julia(c, max_iterations),
        }
    }
}

impl std::fmt::Display for FractalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}
