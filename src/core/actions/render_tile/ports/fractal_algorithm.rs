use crate::core::data::colour::Colour;
use crate::core::data::point::Point;

/// Colours a single pixel. Called concurrently from every tile worker.
pub trait FractalAlgorithm: Send + Sync {
    fn compute(&self, pixel: Point) -> Colour;
}
