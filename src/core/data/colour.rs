use std::fmt;

/// Marks a buffer cell whose colour has not been computed yet.
///
/// Every colour produced by [`Colour::to_argb`] is fully opaque, so a cell with
/// a zero alpha channel can never be mistaken for a rendered pixel.
pub const UNRESOLVED: u32 = 0x0000_0000;

const OPAQUE_ALPHA: u32 = 0xFF00_0000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self::from_rgb(0x00_00_00);
    pub const WHITE: Self = Self::from_rgb(0xFF_FF_FF);

    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// Decodes an ARGB cell. Returns `None` for [`UNRESOLVED`].
    #[must_use]
    pub const fn from_argb(argb: u32) -> Option<Self> {
        if argb & OPAQUE_ALPHA == 0 {
            return None;
        }

        Some(Self::from_rgb(argb))
    }

    #[must_use]
    pub const fn to_argb(self) -> u32 {
        OPAQUE_ALPHA | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channel-wise linear blend, `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t).round() as u8;

        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
