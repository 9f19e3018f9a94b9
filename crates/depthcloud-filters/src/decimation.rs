use depthcloud_image::{Frame, FrameSize};

use crate::config::DecimationParams;
use crate::error::FilterError;

/// Downsample a depth working frame by an integer factor.
///
/// Each output sample is the median of the valid (non-zero) samples in its
/// `magnitude` x `magnitude` source block, which reduces resolution and
/// shot noise at once without smearing across depth edges. A block with no
/// valid samples yields an invalid output pixel.
///
/// # Arguments
///
/// * `src` - The source working frame, zero marking invalid pixels.
/// * `params` - The decimation parameters.
///
/// # Returns
///
/// A new frame of size (width / magnitude, height / magnitude).
pub fn decimate(
    src: &Frame<f32, 1>,
    params: &DecimationParams,
) -> Result<Frame<f32, 1>, FilterError> {
    let factor = params.magnitude as usize;
    if factor == 1 || src.is_empty() {
        return Ok(src.clone());
    }

    let dst_size = FrameSize {
        width: src.width() / factor,
        height: src.height() / factor,
    };
    let mut dst = Frame::from_size_val(dst_size, 0.0f32)?;

    let src_data = src.as_slice();
    let src_width = src.width();
    let dst_data = dst.as_slice_mut();

    let mut block = Vec::with_capacity(factor * factor);
    for oy in 0..dst_size.height {
        for ox in 0..dst_size.width {
            block.clear();
            for ky in 0..factor {
                let row_offset = (oy * factor + ky) * src_width + ox * factor;
                for kx in 0..factor {
                    let v = src_data[row_offset + kx];
                    if v > 0.0 {
                        block.push(v);
                    }
                }
            }
            if !block.is_empty() {
                block.sort_unstable_by(|a, b| a.total_cmp(b));
                dst_data[oy * dst_size.width + ox] = block[block.len() / 2];
            }
        }
    }

    Ok(dst)
}
