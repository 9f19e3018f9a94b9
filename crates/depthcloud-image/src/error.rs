/// An error type for the frame module.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    /// Error when the data length does not match the frame shape.
    #[error("Data length ({0}) does not match the frame size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the sizes of two frames do not match.
    #[error("Frame sizes do not match ({0}x{1} != {2}x{3})")]
    InvalidFrameSize(usize, usize, usize, usize),

    /// Error when the pixel data cannot be cast to the requested type.
    #[error("Failed to cast pixel data to {0}")]
    CastError(&'static str),
}
