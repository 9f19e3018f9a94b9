use glam::{Vec2, Vec3};

use depthcloud_3d::{build_cloud, CloudResolution, DepthProjector, PointCloud};
use depthcloud_filters::{FilterPipeline, PipelineConfig};
use depthcloud_image::{ColorFrame, DepthFrame};

use crate::error::EngineError;

/// The frame pair one update cycle runs on.
///
/// The acquisition layer hands over typed, already-validated frames or
/// explicit absence; the engine never inspects stream capabilities itself.
/// Both frames are borrowed for the duration of the update only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameSet<'a> {
    /// The raw depth frame, if the stream delivered one this cycle.
    pub depth: Option<&'a DepthFrame>,
    /// The color frame, if the stream delivered one this cycle.
    pub color: Option<&'a ColorFrame>,
}

/// Drives one `filter -> project -> resample` sequence per update call.
///
/// The engine owns the filter pipeline (and with it the temporal history),
/// the projector, a scratch vertex buffer and the point cloud, all reused
/// across cycles. It is a pure function of the current frame pair apart
/// from the temporal filter's own history.
pub struct CloudEngine<P> {
    pipeline: FilterPipeline,
    projector: P,
    resolution: CloudResolution,
    cloud: PointCloud,
    vertices: Vec<Vec3>,
    cleaned: Option<DepthFrame>,
    degraded_color: bool,
}

impl<P: DepthProjector> CloudEngine<P> {
    /// Create an engine from a pipeline configuration and a projector.
    ///
    /// # Errors
    ///
    /// Configuration errors surface here, before the first update.
    pub fn new(
        config: PipelineConfig,
        projector: P,
        resolution: CloudResolution,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            pipeline: FilterPipeline::new(config)?,
            projector,
            resolution,
            cloud: PointCloud::new(),
            vertices: Vec::new(),
            cleaned: None,
            degraded_color: false,
        })
    }

    /// Run one update cycle on a frame pair.
    ///
    /// Returns `Ok(false)` when no depth frame is available; the previous
    /// point cloud stays valid (stale) until the next successful cycle.
    /// A missing color frame is not an error: point colors are then shaded
    /// from the depth frame itself. The point cloud is only touched once
    /// filtering and projection have succeeded, so a failed cycle never
    /// leaves a partial cloud behind.
    pub fn update(&mut self, frames: &FrameSet) -> Result<bool, EngineError> {
        let Some(raw) = frames.depth.filter(|d| !d.is_empty()) else {
            return Ok(false);
        };

        let cleaned = self.pipeline.run(raw)?;
        if cleaned.is_empty() {
            return Ok(false);
        }

        self.projector.project(&cleaned, &mut self.vertices)?;

        let color = frames.color.filter(|c| !c.is_empty());
        if color.is_none() && !self.degraded_color {
            log::warn!("color stream absent; shading point colors from the depth frame");
        }
        self.degraded_color = color.is_none();

        build_cloud(
            &self.vertices,
            &cleaned,
            color,
            self.resolution.step(),
            &mut self.cloud,
        )?;
        self.cleaned = Some(cleaned);

        Ok(true)
    }

    /// The colored point cloud built by the last successful update.
    pub fn point_cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// The point positions alone, for consumers that need geometry only.
    pub fn points(&self) -> &[Vec3] {
        self.cloud.points()
    }

    /// The cleaned depth frame of the last successful update.
    pub fn depth_frame(&self) -> Option<&DepthFrame> {
        self.cleaned.as_ref()
    }

    /// The active filter configuration.
    pub fn config(&self) -> &PipelineConfig {
        self.pipeline.config()
    }

    /// The active point cloud density.
    pub fn resolution(&self) -> CloudResolution {
        self.resolution
    }

    /// Change the point cloud density for the next update.
    pub fn set_resolution(&mut self, resolution: CloudResolution) {
        self.resolution = resolution;
    }

    /// Map a depth pixel to normalized color image coordinates.
    ///
    /// Mapping between the depth and color streams needs the sensor's
    /// extrinsic calibration, which the engine does not hold, so this
    /// always reports [`EngineError::MappingNotSupported`] rather than a
    /// made-up coordinate.
    pub fn color_coords_from_depth_pixel(
        &self,
        _x: usize,
        _y: usize,
        _depth: u16,
    ) -> Result<Vec2, EngineError> {
        Err(EngineError::MappingNotSupported)
    }

    /// Map normalized color image coordinates to a camera-space point.
    ///
    /// The inverse of [`Self::color_coords_from_depth_pixel`], unavailable
    /// for the same reason.
    pub fn depth_point_from_color_coords(&self, _uv: Vec2) -> Result<Vec3, EngineError> {
        Err(EngineError::MappingNotSupported)
    }
}
