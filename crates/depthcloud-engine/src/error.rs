use depthcloud_3d::CloudError;
use depthcloud_filters::FilterError;

/// An error type for the engine module.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// Error from the filter pipeline.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error from projection or cloud assembly.
    #[error(transparent)]
    Cloud(#[from] CloudError),

    /// The depth to color mapping needs extrinsic calibration this engine
    /// does not hold.
    #[error("Depth to color mapping requires extrinsic calibration data that is not available")]
    MappingNotSupported,
}
