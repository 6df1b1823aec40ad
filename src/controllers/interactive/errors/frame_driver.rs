use std::error::Error;
use std::fmt;

use crate::controllers::interactive::errors::dispatcher::DispatcherError;
use crate::core::data::pixel_buffer::PixelBufferError;

#[derive(Debug)]
pub enum FrameDriverError {
    /// The buffer is still shared with tile workers.
    GenerationInFlight,
    Buffer(PixelBufferError),
    Dispatcher(DispatcherError),
}

impl fmt::Display for FrameDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerationInFlight => {
                write!(f, "pixel buffer is still shared with tile workers")
            }
            Self::Buffer(err) => write!(f, "pixel buffer error: {}", err),
            Self::Dispatcher(err) => write!(f, "dispatcher error: {}", err),
        }
    }
}

impl Error for FrameDriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::GenerationInFlight => None,
            Self::Buffer(err) => Some(err),
            Self::Dispatcher(err) => Some(err),
        }
    }
}

impl From<PixelBufferError> for FrameDriverError {
    fn from(err: PixelBufferError) -> Self {
        Self::Buffer(err)
    }
}

impl From<DispatcherError> for FrameDriverError {
    fn from(err: DispatcherError) -> Self {
        Self::Dispatcher(err)
    }
}
