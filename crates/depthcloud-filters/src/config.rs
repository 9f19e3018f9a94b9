use crate::error::FilterError;

/// Hole-filling mode of the spatial filter, coded as the sensor SDK codes it.
///
/// The code selects how long a run of invalid pixels may be filled from the
/// nearest valid neighbor during the left-to-right smoothing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoleFilling {
    /// Holes are left untouched.
    #[default]
    Disabled,
    /// Fill runs of up to 2 pixels.
    Radius2,
    /// Fill runs of up to 4 pixels.
    Radius4,
    /// Fill runs of up to 8 pixels.
    Radius8,
    /// Fill runs of up to 16 pixels.
    Radius16,
    /// Fill runs of any length.
    Unlimited,
}

impl HoleFilling {
    /// Resolve an integer mode code.
    ///
    /// # Errors
    ///
    /// If the code does not name a mode, an error is returned.
    pub fn from_index(index: u8) -> Result<Self, FilterError> {
        match index {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Radius2),
            2 => Ok(Self::Radius4),
            3 => Ok(Self::Radius8),
            4 => Ok(Self::Radius16),
            5 => Ok(Self::Unlimited),
            _ => Err(FilterError::UnknownModeIndex("hole filling", index)),
        }
    }

    /// The longest run of invalid pixels this mode fills.
    pub fn radius(self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Radius2 => 2,
            Self::Radius4 => 4,
            Self::Radius8 => 8,
            Self::Radius16 => 16,
            Self::Unlimited => usize::MAX,
        }
    }
}

/// Persistence mode of the temporal filter, coded as the sensor SDK codes it.
///
/// The mode decides in which recent-history patterns a currently invalid
/// pixel may be carried over from its last smoothed value. History covers
/// the last eight frames, most recent first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Never carry missing pixels.
    Disabled,
    /// Carry if the pixel was valid in all of the last 8 frames.
    ValidIn8Of8,
    /// Carry if the pixel was valid in 2 of the last 3 frames.
    ValidIn2OfLast3,
    /// Carry if the pixel was valid in 2 of the last 4 frames.
    #[default]
    ValidIn2OfLast4,
    /// Carry if the pixel was valid in 2 of the last 8 frames.
    ValidIn2Of8,
    /// Carry if the pixel was valid in 1 of the last 2 frames.
    ValidIn1OfLast2,
    /// Carry if the pixel was valid in 1 of the last 5 frames.
    ValidIn1OfLast5,
    /// Carry if the pixel was valid in 1 of the last 8 frames.
    ValidIn1Of8,
    /// Always carry once a value has been seen.
    Always,
}

impl Persistence {
    /// Resolve an integer mode code.
    ///
    /// # Errors
    ///
    /// If the code does not name a mode, an error is returned.
    pub fn from_index(index: u8) -> Result<Self, FilterError> {
        match index {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::ValidIn8Of8),
            2 => Ok(Self::ValidIn2OfLast3),
            3 => Ok(Self::ValidIn2OfLast4),
            4 => Ok(Self::ValidIn2Of8),
            5 => Ok(Self::ValidIn1OfLast2),
            6 => Ok(Self::ValidIn1OfLast5),
            7 => Ok(Self::ValidIn1Of8),
            8 => Ok(Self::Always),
            _ => Err(FilterError::UnknownModeIndex("persistence", index)),
        }
    }

    /// Whether a missing pixel may be carried, given its validity history.
    ///
    /// Bit `i` of `history` is set when the pixel was valid `i + 1` frames ago.
    pub(crate) fn allows(self, history: u8) -> bool {
        match self {
            Self::Disabled => false,
            Self::ValidIn8Of8 => history == 0xff,
            Self::ValidIn2OfLast3 => (history & 0b111).count_ones() >= 2,
            Self::ValidIn2OfLast4 => (history & 0b1111).count_ones() >= 2,
            Self::ValidIn2Of8 => history.count_ones() >= 2,
            Self::ValidIn1OfLast2 => history & 0b11 != 0,
            Self::ValidIn1OfLast5 => history & 0b11111 != 0,
            Self::ValidIn1Of8 => history != 0,
            Self::Always => true,
        }
    }
}

/// Parameters of the decimation stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecimationParams {
    /// Downsampling factor. A factor of 1 leaves the frame unchanged.
    pub magnitude: u32,
}

impl Default for DecimationParams {
    fn default() -> Self {
        Self { magnitude: 2 }
    }
}

impl DecimationParams {
    pub(crate) fn validate(&self) -> Result<(), FilterError> {
        if self.magnitude < 1 {
            return Err(FilterError::InvalidParameter {
                stage: "decimation",
                name: "magnitude",
                value: self.magnitude as f32,
            });
        }
        Ok(())
    }
}

/// Parameters of the edge-preserving spatial smoothing stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialParams {
    /// Number of smoothing iterations.
    pub magnitude: u32,
    /// Smoothing strength in (0, 1]; lower values smooth more.
    pub smooth_alpha: f32,
    /// Edge threshold in the working units; steps above it stop smoothing.
    pub smooth_delta: u16,
    /// Hole-filling mode applied during the horizontal pass.
    pub hole_filling: HoleFilling,
}

impl Default for SpatialParams {
    fn default() -> Self {
        Self {
            magnitude: 2,
            smooth_alpha: 0.5,
            smooth_delta: 20,
            hole_filling: HoleFilling::Disabled,
        }
    }
}

impl SpatialParams {
    pub(crate) fn validate(&self) -> Result<(), FilterError> {
        if self.magnitude < 1 {
            return Err(FilterError::InvalidParameter {
                stage: "spatial",
                name: "magnitude",
                value: self.magnitude as f32,
            });
        }
        validate_alpha_delta("spatial", self.smooth_alpha, self.smooth_delta)
    }
}

/// Parameters of the temporal smoothing stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TemporalParams {
    /// Smoothing strength in (0, 1]; lower values smooth more.
    pub smooth_alpha: f32,
    /// Change threshold in the working units; steps above it bypass blending.
    pub smooth_delta: u16,
    /// Persistence mode for pixels missing in the current frame.
    pub persistence: Persistence,
}

impl Default for TemporalParams {
    fn default() -> Self {
        Self {
            smooth_alpha: 0.4,
            smooth_delta: 20,
            persistence: Persistence::default(),
        }
    }
}

impl TemporalParams {
    pub(crate) fn validate(&self) -> Result<(), FilterError> {
        validate_alpha_delta("temporal", self.smooth_alpha, self.smooth_delta)
    }
}

fn validate_alpha_delta(stage: &'static str, alpha: f32, delta: u16) -> Result<(), FilterError> {
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(FilterError::InvalidParameter {
            stage,
            name: "smooth_alpha",
            value: alpha,
        });
    }
    if delta < 1 {
        return Err(FilterError::InvalidParameter {
            stage,
            name: "smooth_delta",
            value: delta as f32,
        });
    }
    Ok(())
}

/// Configuration of the whole filter pipeline as plain data.
///
/// A `None` stage or a `false` toggle disables that stage; disabled stages
/// are never invoked. The stage order is fixed: decimation, forward
/// disparity, spatial smoothing, temporal smoothing, inverse disparity.
/// The forward/inverse disparity pair brackets the smoothing stages so they
/// operate in disparity space when enabled, and must be toggled together.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Decimation stage, if enabled.
    pub decimation: Option<DecimationParams>,
    /// Depth-to-disparity transform ahead of the smoothing stages.
    pub disparity_forward: bool,
    /// Disparity-to-depth transform after the smoothing stages.
    pub disparity_inverse: bool,
    /// Spatial smoothing stage, if enabled.
    pub spatial: Option<SpatialParams>,
    /// Temporal smoothing stage, if enabled.
    pub temporal: Option<TemporalParams>,
    /// Scale constant of the reciprocal disparity transform. Stands in for
    /// the stereo baseline times focal length product the device reports.
    pub disparity_scale: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            decimation: None,
            disparity_forward: false,
            disparity_inverse: false,
            spatial: None,
            temporal: None,
            disparity_scale: 1.0e6,
        }
    }
}

impl PipelineConfig {
    /// Enable the disparity transform pair around the smoothing stages.
    pub fn with_disparity(mut self) -> Self {
        self.disparity_forward = true;
        self.disparity_inverse = true;
        self
    }

    /// Whether any stage is enabled.
    pub fn any_enabled(&self) -> bool {
        self.decimation.is_some()
            || self.disparity_forward
            || self.disparity_inverse
            || self.spatial.is_some()
            || self.temporal.is_some()
    }

    /// Check the configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns an error when a stage parameter is out of range, or when the
    /// disparity transform pair is toggled asymmetrically.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.disparity_forward != self.disparity_inverse {
            return Err(FilterError::UnpairedDisparity);
        }
        if let Some(params) = &self.decimation {
            params.validate()?;
        }
        if let Some(params) = &self.spatial {
            params.validate()?;
        }
        if let Some(params) = &self.temporal {
            params.validate()?;
        }
        if !(self.disparity_scale > 0.0) {
            return Err(FilterError::InvalidParameter {
                stage: "disparity",
                name: "disparity_scale",
                value: self.disparity_scale,
            });
        }
        Ok(())
    }
}
