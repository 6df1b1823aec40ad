pub mod burning_ship;
pub mod colour_mapping;
pub mod escape;
pub mod escape_time_algorithm;
pub mod fractal_kinds;
pub mod julia;
pub mod mandelbrot;
