use crate::core::data::colour::UNRESOLVED;
use crate::core::data::frame_snapshot::FrameSnapshot;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    PixelOutsideTile {
        pixel: Point,
        tile: PixelRect,
    },
    InvalidSize(PixelRectError),
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of buffer bounds {}",
                    pixel.x, pixel.y, pixel_rect
                )
            }
            Self::PixelOutsideTile { pixel, tile } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of tile {}",
                    pixel.x, pixel.y, tile
                )
            }
            Self::InvalidSize(err) => write!(f, "invalid buffer size: {}", err),
        }
    }
}

impl Error for PixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidSize(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PixelRectError> for PixelBufferError {
    fn from(err: PixelRectError) -> Self {
        Self::InvalidSize(err)
    }
}

fn allocate_cells(pixel_rect: PixelRect) -> Vec<AtomicU32> {
    (0..pixel_rect.size()).map(|_| AtomicU32::new(UNRESOLVED)).collect()
}

/// The video buffer: one ARGB cell per pixel, or [`UNRESOLVED`].
///
/// Cells are atomics so tile workers can write through a shared `Arc` while
/// the owner keeps read access for presentation. Workers only ever write
/// inside their own tile (see [`TileWindow`]), so no two threads race on a
/// cell. Bulk operations take `&mut self` and therefore cannot run while any
/// worker still holds the buffer.
#[derive(Debug)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    cells: Vec<AtomicU32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        let pixel_rect = PixelRect::with_size(Point::default(), width, height)?;

        Ok(Self {
            pixel_rect,
            cells: allocate_cells(pixel_rect),
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        Ok(pixel.y as usize * self.width() as usize + pixel.x as usize)
    }

    pub fn get(&self, pixel: Point) -> Result<u32, PixelBufferError> {
        let index = self.index_of(pixel)?;
        Ok(self.cells[index].load(Ordering::Relaxed))
    }

    pub fn set(&self, pixel: Point, argb: u32) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;
        self.cells[index].store(argb, Ordering::Relaxed);
        Ok(())
    }

    pub fn invalidate_all(&mut self) {
        for cell in &mut self.cells {
            *cell.get_mut() = UNRESOLVED;
        }
    }

    /// Reallocates for the new window size. Every cell starts unresolved.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PixelBufferError> {
        let pixel_rect = PixelRect::with_size(Point::default(), width, height)?;

        self.cells = allocate_cells(pixel_rect);
        self.pixel_rect = pixel_rect;
        Ok(())
    }

    #[must_use]
    pub fn unresolved_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed) == UNRESOLVED)
            .count()
    }

    /// Copies the current cells. Cells a running generation has not reached
    /// yet come out as [`UNRESOLVED`].
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::new(
            self.width(),
            self.height(),
            self.cells.iter().map(|cell| cell.load(Ordering::Relaxed)).collect(),
        )
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut u32 {
        self.cells[index].get_mut()
    }
}

/// A worker's write window: the buffer restricted to a single tile.
#[derive(Debug, Clone, Copy)]
pub struct TileWindow<'a> {
    buffer: &'a PixelBuffer,
    tile: PixelRect,
}

impl<'a> TileWindow<'a> {
    pub fn new(buffer: &'a PixelBuffer, tile: PixelRect) -> Result<Self, PixelBufferError> {
        let bounds = buffer.pixel_rect();

        for corner in [tile.top_left(), tile.bottom_right()] {
            if !bounds.contains_point(corner) {
                return Err(PixelBufferError::PixelOutsideBounds {
                    pixel: corner,
                    pixel_rect: bounds,
                });
            }
        }

        Ok(Self { buffer, tile })
    }

    #[must_use]
    pub fn tile(&self) -> PixelRect {
        self.tile
    }

    fn check(&self, pixel: Point) -> Result<(), PixelBufferError> {
        if !self.tile.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideTile {
                pixel,
                tile: self.tile,
            });
        }
        Ok(())
    }

    pub fn get(&self, pixel: Point) -> Result<u32, PixelBufferError> {
        self.check(pixel)?;
        self.buffer.get(pixel)
    }

    pub fn set(&self, pixel: Point, argb: u32) -> Result<(), PixelBufferError> {
        self.check(pixel)?;
        self.buffer.set(pixel, argb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    fn red() -> u32 {
        Colour { r: 255, g: 0, b: 0 }.to_argb()
    }

    #[test]
    fn test_new_buffer_is_fully_unresolved() {
        let buffer = PixelBuffer::new(10, 10).unwrap();

        assert_eq!(buffer.width(), 10);
        assert_eq!(buffer.height(), 10);
        assert_eq!(buffer.unresolved_count(), 100);
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert_eq!(
            PixelBuffer::new(0, 3).unwrap_err(),
            PixelBufferError::InvalidSize(PixelRectError::InvalidSize { width: 0, height: 3 })
        );
    }

    #[test]
    fn test_set_then_get() {
        let buffer = PixelBuffer::new(3, 3).unwrap();

        buffer.set(Point { x: 2, y: 1 }, red()).unwrap();

        assert_eq!(buffer.get(Point { x: 2, y: 1 }), Ok(red()));
        assert_eq!(buffer.get(Point { x: 1, y: 2 }), Ok(UNRESOLVED));
        assert_eq!(buffer.unresolved_count(), 8);
    }

    #[test]
    fn test_out_of_bounds_access_is_rejected() {
        let buffer = PixelBuffer::new(3, 3).unwrap();
        let pixel_rect = buffer.pixel_rect();

        for pixel in [Point { x: 3, y: 0 }, Point { x: 0, y: 3 }, Point { x: -1, y: -1 }] {
            assert_eq!(
                buffer.set(pixel, red()),
                Err(PixelBufferError::PixelOutsideBounds { pixel, pixel_rect })
            );
            assert_eq!(
                buffer.get(pixel),
                Err(PixelBufferError::PixelOutsideBounds { pixel, pixel_rect })
            );
        }
    }

    #[test]
    fn test_invalidate_all() {
        let mut buffer = PixelBuffer::new(4, 2).unwrap();
        for pixel in buffer.pixel_rect().points() {
            buffer.set(pixel, red()).unwrap();
        }
        assert_eq!(buffer.unresolved_count(), 0);

        buffer.invalidate_all();

        assert_eq!(buffer.unresolved_count(), 8);
    }

    #[test]
    fn test_resize_reallocates_and_invalidates() {
        let mut buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.set(Point { x: 1, y: 1 }, red()).unwrap();

        buffer.resize(5, 3).unwrap();

        assert_eq!(buffer.width(), 5);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.unresolved_count(), 15);
        assert!(buffer.get(Point { x: 4, y: 2 }).is_ok());
    }

    #[test]
    fn test_failed_resize_keeps_old_buffer() {
        let mut buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.set(Point { x: 0, y: 0 }, red()).unwrap();

        assert!(buffer.resize(0, 0).is_err());
        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.get(Point { x: 0, y: 0 }), Ok(red()));
    }

    #[test]
    fn test_snapshot_copies_cells_row_major() {
        let buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.set(Point { x: 1, y: 0 }, red()).unwrap();

        let snapshot = buffer.snapshot();

        assert_eq!(snapshot.width(), 2);
        assert_eq!(snapshot.height(), 2);
        assert_eq!(snapshot.pixels(), &[UNRESOLVED, red(), UNRESOLVED, UNRESOLVED]);
    }

    #[test]
    fn test_tile_window_writes_inside_tile() {
        let buffer = PixelBuffer::new(4, 4).unwrap();
        let tile = PixelRect::with_size(Point { x: 2, y: 2 }, 2, 2).unwrap();
        let window = TileWindow::new(&buffer, tile).unwrap();

        window.set(Point { x: 3, y: 2 }, red()).unwrap();

        assert_eq!(buffer.get(Point { x: 3, y: 2 }), Ok(red()));
        assert_eq!(window.get(Point { x: 3, y: 2 }), Ok(red()));
    }

    #[test]
    fn test_tile_window_rejects_pixels_outside_tile() {
        let buffer = PixelBuffer::new(4, 4).unwrap();
        let tile = PixelRect::with_size(Point { x: 0, y: 0 }, 2, 2).unwrap();
        let window = TileWindow::new(&buffer, tile).unwrap();
        let pixel = Point { x: 2, y: 0 };

        assert_eq!(
            window.set(pixel, red()),
            Err(PixelBufferError::PixelOutsideTile { pixel, tile })
        );
        assert_eq!(buffer.get(pixel), Ok(UNRESOLVED));
    }

    #[test]
    fn test_tile_window_must_fit_buffer() {
        let buffer = PixelBuffer::new(4, 4).unwrap();
        let tile = PixelRect::with_size(Point { x: 3, y: 3 }, 2, 2).unwrap();

        assert!(matches!(
            TileWindow::new(&buffer, tile),
            Err(PixelBufferError::PixelOutsideBounds { .. })
        ));
    }
}
