pub mod cancellation;
pub mod render_tile;
pub mod shift_pixel_buffer;
