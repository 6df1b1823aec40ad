use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use crate::core::util::perfect_square::nearest_square_side;

/// Grid side actually used for a buffer: never more cells than pixels along
/// either axis, so no tile is ever empty.
#[must_use]
pub fn tile_grid_dimensions(workers: u32, pixel_rect: PixelRect) -> (u32, u32) {
    let side = nearest_square_side(workers);

    (side.min(pixel_rect.width()), side.min(pixel_rect.height()))
}

fn span(cell: u32, cells: u32, cell_len: u32, total_len: u32) -> (i32, i32) {
    let start = cell * cell_len;

    let end = if cell == cells - 1 {
        total_len - 1 // Last cell takes any remainder
    } else {
        (cell + 1) * cell_len - 1
    };

    (start as i32, end as i32)
}

/// Splits `pixel_rect` into a row-major grid of `√workers × √workers` tiles.
///
/// Tiles are disjoint and their union is exactly `pixel_rect`. Remainder
/// columns and rows belong to the right-most and bottom-most tiles.
pub fn partition_tiles(workers: u32, pixel_rect: PixelRect) -> Result<Vec<PixelRect>, PixelRectError> {
    let (columns, rows) = tile_grid_dimensions(workers, pixel_rect);
    let tile_width = pixel_rect.width() / columns;
    let tile_height = pixel_rect.height() / rows;
    let origin = pixel_rect.top_left();

    let mut tiles = Vec::with_capacity((columns * rows) as usize);

    for row in 0..rows {
        let (top, bottom) = span(row, rows, tile_height, pixel_rect.height());

        for column in 0..columns {
            let (left, right) = span(column, columns, tile_width, pixel_rect.width());

            tiles.push(PixelRect::new(
                Point {
                    x: origin.x + left,
                    y: origin.y + top,
                },
                Point {
                    x: origin.x + right,
                    y: origin.y + bottom,
                },
            )?);
        }
    }

    Ok(tiles)
}
