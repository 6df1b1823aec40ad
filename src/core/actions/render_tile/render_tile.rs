use crate::core::actions::cancellation::{CancelToken, Cancelled, CANCEL_CHECK_INTERVAL_PIXELS};
use crate::core::actions::render_tile::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::UNRESOLVED;
use crate::core::data::pixel_buffer::{PixelBufferError, TileWindow};
use crate::core::data::point::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderTileError {
    Cancelled(Cancelled),
    PixelBuffer(PixelBufferError),
}

impl std::fmt::Display for RenderTileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderTileError::Cancelled(c) => write!(f, "{}", c),
            RenderTileError::PixelBuffer(e) => write!(f, "pixel buffer error: {}", e),
        }
    }
}

impl std::error::Error for RenderTileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderTileError::Cancelled(c) => Some(c),
            RenderTileError::PixelBuffer(e) => Some(e),
        }
    }
}

impl From<PixelBufferError> for RenderTileError {
    fn from(err: PixelBufferError) -> Self {
        RenderTileError::PixelBuffer(err)
    }
}

/// Fills every unresolved pixel of one tile and returns how many it resolved.
///
/// Already resolved cells are left untouched, which is what makes a shifted
/// buffer cheap to redraw. Cancellation is checked at the start of each row
/// and every [`CANCEL_CHECK_INTERVAL_PIXELS`] pixels within a row.
pub fn render_tile<Alg, C>(
    window: &TileWindow<'_>,
    algorithm: &Alg,
    cancel: &C,
) -> Result<u64, RenderTileError>
where
    Alg: FractalAlgorithm + ?Sized,
    C: CancelToken + ?Sized,
{
    let tile = window.tile();
    let x_start = tile.top_left().x;
    let x_end = tile.bottom_right().x;
    let mut resolved = 0;

    for y in tile.top_left().y..=tile.bottom_right().y {
        for (i, x) in (x_start..=x_end).enumerate() {
            if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                return Err(RenderTileError::Cancelled(Cancelled));
            }

            let pixel = Point { x, y };
            if window.get(pixel)? != UNRESOLVED {
                continue;
            }

            window.set(pixel, algorithm.compute(pixel).to_argb())?;
            resolved += 1;
        }
    }

    Ok(resolved)
}
