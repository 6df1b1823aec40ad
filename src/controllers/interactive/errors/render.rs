use std::fmt;

/// A failed frame, reported to the presenter instead of a picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub generation: u64,
    pub message: String,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "generation {} failed: {}", self.generation, self.message)
    }
}

impl std::error::Error for RenderError {}
