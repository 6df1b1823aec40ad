pub mod partition_tiles;
pub mod perfect_square;
pub mod pixel_to_complex_coords;
