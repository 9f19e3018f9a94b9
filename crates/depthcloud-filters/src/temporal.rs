use depthcloud_image::{Frame, FrameSize};

use crate::config::TemporalParams;
use crate::error::FilterError;

/// Temporal smoothing filter over consecutive depth frames.
///
/// Unlike the other stages this one owns state: the last smoothed value and
/// an eight-frame validity history per pixel. A valid pixel close enough to
/// its last value is blended into it; a missing pixel is carried over from
/// the last value when the persistence mode accepts its history. The history
/// resets whenever the incoming frame size changes, such as after a change
/// of the upstream decimation factor.
#[derive(Debug, Clone)]
pub struct TemporalFilter {
    params: TemporalParams,
    size: FrameSize,
    last: Vec<f32>,
    history: Vec<u8>,
}

impl TemporalFilter {
    /// Create a new temporal filter with empty history.
    pub fn new(params: TemporalParams) -> Self {
        Self {
            params,
            size: FrameSize {
                width: 0,
                height: 0,
            },
            last: Vec::new(),
            history: Vec::new(),
        }
    }

    /// The filter parameters.
    pub fn params(&self) -> &TemporalParams {
        &self.params
    }

    /// Drop all accumulated history.
    pub fn reset(&mut self) {
        self.last.clear();
        self.last.resize(self.size.width * self.size.height, 0.0);
        self.history.clear();
        self.history.resize(self.size.width * self.size.height, 0);
    }

    /// Smooth one frame against the accumulated history and advance it.
    ///
    /// An empty frame passes through without touching the history.
    pub fn apply(&mut self, src: &Frame<f32, 1>) -> Result<Frame<f32, 1>, FilterError> {
        if src.is_empty() {
            return Ok(src.clone());
        }

        if src.size() != self.size {
            self.size = src.size();
            self.reset();
        }

        let alpha = self.params.smooth_alpha;
        let delta = self.params.smooth_delta as f32;
        let persistence = self.params.persistence;

        let mut dst = Frame::from_size_val(self.size, 0.0f32)?;
        for (i, (&cur, out)) in src
            .as_slice()
            .iter()
            .zip(dst.as_slice_mut().iter_mut())
            .enumerate()
        {
            if cur > 0.0 {
                let prev = self.last[i];
                let smoothed = if prev > 0.0 && (cur - prev).abs() <= delta {
                    alpha * cur + (1.0 - alpha) * prev
                } else {
                    cur
                };
                self.last[i] = smoothed;
                *out = smoothed;
            } else if self.last[i] > 0.0 && persistence.allows(self.history[i]) {
                *out = self.last[i];
            }
            self.history[i] = (self.history[i] << 1) | (cur > 0.0) as u8;
        }

        Ok(dst)
    }
}
