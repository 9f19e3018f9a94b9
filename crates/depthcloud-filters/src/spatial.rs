use depthcloud_image::Frame;

use crate::config::SpatialParams;
use crate::error::FilterError;

/// Smooth a depth working frame while preserving depth edges.
///
/// Each iteration runs four 1D recursive passes (left-to-right,
/// right-to-left, top-to-bottom, bottom-to-top). A pass carries the last
/// smoothed value along the scan line and blends a pixel into it only when
/// the two differ by at most `smooth_delta`; a larger step is treated as a
/// true depth edge and resets the carry. Runs of invalid pixels up to the
/// hole-filling radius are filled from the carried value during the
/// left-to-right pass.
///
/// # Arguments
///
/// * `src` - The source working frame, zero marking invalid pixels.
/// * `params` - The smoothing parameters.
pub fn spatial_smooth(
    src: &Frame<f32, 1>,
    params: &SpatialParams,
) -> Result<Frame<f32, 1>, FilterError> {
    if src.is_empty() {
        return Ok(src.clone());
    }

    let width = src.width();
    let height = src.height();
    let alpha = params.smooth_alpha;
    let delta = params.smooth_delta as f32;
    let hole_radius = params.hole_filling.radius();

    let mut data = src.as_slice().to_vec();

    for _ in 0..params.magnitude {
        // left to right, the only pass that fills holes
        for y in 0..height {
            let row = &mut data[y * width..(y + 1) * width];
            let mut carry = None;
            let mut hole_run = 0usize;
            for x in 0..width {
                let v = row[x];
                if v > 0.0 {
                    let out = blend(v, carry, alpha, delta);
                    row[x] = out;
                    carry = Some(out);
                    hole_run = 0;
                } else if let Some(c) = carry {
                    hole_run += 1;
                    if hole_run <= hole_radius {
                        row[x] = c;
                    }
                }
            }
        }

        // right to left
        for y in 0..height {
            let row = &mut data[y * width..(y + 1) * width];
            let mut carry = None;
            for x in (0..width).rev() {
                let v = row[x];
                if v > 0.0 {
                    let out = blend(v, carry, alpha, delta);
                    row[x] = out;
                    carry = Some(out);
                }
            }
        }

        // top to bottom
        for x in 0..width {
            let mut carry = None;
            for y in 0..height {
                let v = data[y * width + x];
                if v > 0.0 {
                    let out = blend(v, carry, alpha, delta);
                    data[y * width + x] = out;
                    carry = Some(out);
                }
            }
        }

        // bottom to top
        for x in 0..width {
            let mut carry = None;
            for y in (0..height).rev() {
                let v = data[y * width + x];
                if v > 0.0 {
                    let out = blend(v, carry, alpha, delta);
                    data[y * width + x] = out;
                    carry = Some(out);
                }
            }
        }
    }

    Ok(Frame::new(src.size(), data)?)
}

#[inline]
fn blend(cur: f32, carry: Option<f32>, alpha: f32, delta: f32) -> f32 {
    match carry {
        Some(prev) if (cur - prev).abs() <= delta => alpha * cur + (1.0 - alpha) * prev,
        _ => cur,
    }
}
