use depthcloud_image::FrameError;

/// An error type for the filters module.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// Error when the disparity transform stages are not toggled as a pair.
    #[error("Disparity transform stages must be enabled as a forward/inverse pair")]
    UnpairedDisparity,

    /// Error when a stage parameter is outside its valid range.
    #[error("Invalid {stage} parameter {name}: {value}")]
    InvalidParameter {
        /// The stage the parameter belongs to.
        stage: &'static str,
        /// The parameter name.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Error when an integer mode code does not name a known variant.
    #[error("Unknown {0} index: {1}")]
    UnknownModeIndex(&'static str, u8),

    /// Error from the underlying frame container.
    #[error(transparent)]
    Frame(#[from] FrameError),
}
