use depthcloud_image::FrameSize;

/// Intrinsic parameters of a pinhole depth sensor.
///
/// Supplied by the device layer from the sensor's stored calibration. The
/// reference size records which stream resolution the calibration belongs
/// to, so the parameters can be rescaled when the depth frame has been
/// decimated upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeIntrinsics {
    /// The stream resolution the calibration was produced for.
    pub size: FrameSize,
    /// The focal length in pixels (fx, fy).
    pub focal_length: (f32, f32),
    /// The principal point in pixels (ppx, ppy).
    pub principal_point: (f32, f32),
    /// Meters per sensor depth unit.
    pub depth_scale: f32,
}

impl PinholeIntrinsics {
    /// Create new intrinsics for the given stream resolution.
    pub fn new(
        size: FrameSize,
        focal_length: (f32, f32),
        principal_point: (f32, f32),
        depth_scale: f32,
    ) -> Self {
        Self {
            size,
            focal_length,
            principal_point,
            depth_scale,
        }
    }

    /// Rescale the calibration to a different stream resolution.
    ///
    /// Focal lengths and the principal point scale with the resolution
    /// ratio per axis, the way the sensor SDK republishes intrinsics after
    /// its decimation filter.
    pub fn scaled_to(&self, size: FrameSize) -> Self {
        if size == self.size {
            return self.clone();
        }
        let sx = size.width as f32 / self.size.width as f32;
        let sy = size.height as f32 / self.size.height as f32;
        Self {
            size,
            focal_length: (self.focal_length.0 * sx, self.focal_length.1 * sy),
            principal_point: (self.principal_point.0 * sx, self.principal_point.1 * sy),
            depth_scale: self.depth_scale,
        }
    }
}
