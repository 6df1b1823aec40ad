use rayon::prelude::*;

use crate::core::data::colour::{Colour, UNRESOLVED};

/// A consistent copy of the video buffer handed to screenshot and
/// presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameSnapshot {
    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major ARGB cells.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.pixels.iter().filter(|&&cell| cell == UNRESOLVED).count()
    }

    /// Packed RGB triplets; unresolved cells are written as `background`.
    #[must_use]
    pub fn to_rgb_bytes(&self, background: Colour) -> Vec<u8> {
        let mut bytes = vec![0; self.pixels.len() * 3];

        bytes
            .par_chunks_exact_mut(3)
            .zip(self.pixels.par_iter())
            .for_each(|(dst, &cell)| {
                let colour = Colour::from_argb(cell).unwrap_or(background);
                dst[0] = colour.r;
                dst[1] = colour.g;
                dst[2] = colour.b;
            });

        bytes
    }

    /// RGBA quadruplets with full alpha, the layout `pixels` frames expect.
    pub fn write_rgba(&self, dest: &mut [u8], background: Colour) {
        dest.par_chunks_exact_mut(4)
            .zip(self.pixels.par_iter())
            .for_each(|(dst, &cell)| {
                let colour = Colour::from_argb(cell).unwrap_or(background);
                dst[0] = colour.r;
                dst[1] = colour.g;
                dst[2] = colour.b;
                dst[3] = 255;
            });
    }
}
