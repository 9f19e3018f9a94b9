use depthcloud_image::FrameError;

/// An error type for the 3d module.
#[derive(thiserror::Error, Debug)]
pub enum CloudError {
    /// Error when the vertex array does not cover the depth frame.
    #[error("Vertex count ({actual}) does not match the depth frame ({expected})")]
    VertexCountMismatch {
        /// The vertex count the depth frame requires.
        expected: usize,
        /// The vertex count that was supplied.
        actual: usize,
    },

    /// Error when the sampling step is zero.
    #[error("Cloud sampling step must be at least 1")]
    InvalidStep,

    /// Error when the projector intrinsics are degenerate.
    #[error("Degenerate projector intrinsics (fx: {0}, fy: {1})")]
    InvalidIntrinsics(f32, f32),

    /// Error from the underlying frame container.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
