use std::error::Error;
use std::fmt;

use crate::core::actions::render_tile::render_tile::RenderTileError;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};

#[derive(Debug)]
pub enum DispatcherError {
    NotPartitioned,
    GenerationInFlight,
    PartitionMismatch {
        partitioned: PixelRect,
        buffer: PixelRect,
    },
    Partition(PixelRectError),
    ThreadPool(rayon::ThreadPoolBuildError),
    WorkerLost {
        reported: usize,
        expected: usize,
    },
    Tile {
        index: usize,
        tile: PixelRect,
        source: RenderTileError,
    },
}

impl fmt::Display for DispatcherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPartitioned => write!(f, "dispatch requested before partition"),
            Self::GenerationInFlight => {
                write!(f, "a dispatch generation is still in flight; await it first")
            }
            Self::PartitionMismatch { partitioned, buffer } => write!(
                f,
                "tiles were partitioned for {} but the buffer is {}",
                partitioned, buffer
            ),
            Self::Partition(err) => write!(f, "failed to partition tiles: {}", err),
            Self::ThreadPool(err) => write!(f, "failed to build tile worker pool: {}", err),
            Self::WorkerLost { reported, expected } => write!(
                f,
                "tile workers disconnected after {} of {} reports",
                reported, expected
            ),
            Self::Tile { index, tile, source } => {
                write!(f, "tile {} ({}) failed: {}", index, tile, source)
            }
        }
    }
}

impl Error for DispatcherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Partition(err) => Some(err),
            Self::ThreadPool(err) => Some(err),
            Self::Tile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PixelRectError> for DispatcherError {
    fn from(err: PixelRectError) -> Self {
        Self::Partition(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for DispatcherError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}
