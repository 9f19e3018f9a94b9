use depthcloud_image::Frame;

use crate::error::FilterError;

/// Convert a depth working frame to disparity ahead of the smoothing stages.
///
/// Disparity is inversely proportional to depth, so smoothing in disparity
/// space weights near geometry more strongly and behaves better around
/// depth discontinuities. Invalid pixels stay invalid.
///
/// # Arguments
///
/// * `src` - The source working frame, zero marking invalid pixels.
/// * `scale` - The proportionality constant, strictly positive.
pub fn depth_to_disparity(src: &Frame<f32, 1>, scale: f32) -> Result<Frame<f32, 1>, FilterError> {
    reciprocal(src, scale)
}

/// Convert a disparity working frame back to depth after the smoothing
/// stages. Must use the same scale constant as [`depth_to_disparity`].
pub fn disparity_to_depth(src: &Frame<f32, 1>, scale: f32) -> Result<Frame<f32, 1>, FilterError> {
    reciprocal(src, scale)
}

// the reciprocal is its own inverse up to the shared scale constant
fn reciprocal(src: &Frame<f32, 1>, scale: f32) -> Result<Frame<f32, 1>, FilterError> {
    if src.is_empty() {
        return Ok(src.clone());
    }

    let data = src
        .as_slice()
        .iter()
        .map(|&v| if v > 0.0 { scale / v } else { 0.0 })
        .collect();

    Ok(Frame::new(src.size(), data)?)
}
