use depthcloud_image::{ops, DepthFrame, Frame};

use crate::config::PipelineConfig;
use crate::decimation::decimate;
use crate::disparity::{depth_to_disparity, disparity_to_depth};
use crate::error::FilterError;
use crate::spatial::spatial_smooth;
use crate::temporal::TemporalFilter;

/// The ordered depth-cleaning pipeline.
///
/// Enabled stages are applied in a fixed order: decimation, forward
/// disparity, spatial smoothing, temporal smoothing, inverse disparity.
/// Disabled stages are skipped entirely, so the temporal history does not
/// advance while that stage is off. The stages run on an f32 working copy
/// of the frame; the raw u16 frame is promoted on entry and rounded back
/// on exit.
pub struct FilterPipeline {
    config: PipelineConfig,
    temporal: Option<TemporalFilter>,
}

impl FilterPipeline {
    /// Create a pipeline from a validated configuration.
    ///
    /// # Errors
    ///
    /// Configuration errors surface here, before any frame is processed.
    pub fn new(config: PipelineConfig) -> Result<Self, FilterError> {
        config.validate()?;
        let temporal = config.temporal.map(TemporalFilter::new);
        Ok(Self { config, temporal })
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Clean one raw depth frame.
    ///
    /// An empty input frame yields an empty output frame. With every stage
    /// disabled the input is returned unchanged.
    pub fn run(&mut self, raw: &DepthFrame) -> Result<DepthFrame, FilterError> {
        if raw.is_empty() {
            return Ok(DepthFrame::empty());
        }
        if !self.config.any_enabled() {
            return Ok(raw.clone());
        }

        let mut work = Frame::from_size_val(raw.size(), 0.0f32)?;
        ops::cast_and_scale(raw, &mut work, 1.0)?;

        if let Some(params) = &self.config.decimation {
            work = decimate(&work, params)?;
        }
        if self.config.disparity_forward {
            work = depth_to_disparity(&work, self.config.disparity_scale)?;
        }
        if let Some(params) = &self.config.spatial {
            work = spatial_smooth(&work, params)?;
        }
        if let Some(temporal) = &mut self.temporal {
            work = temporal.apply(&work)?;
        }
        if self.config.disparity_inverse {
            work = disparity_to_depth(&work, self.config.disparity_scale)?;
        }

        let mut out = DepthFrame::from_size_val(work.size(), 0)?;
        for (dst, &v) in out.as_slice_mut().iter_mut().zip(work.as_slice()) {
            *dst = v.round().clamp(0.0, u16::MAX as f32) as u16;
        }

        Ok(out)
    }
}
