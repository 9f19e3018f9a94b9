use glam::Vec3;

use depthcloud_image::{ColorFrame, DepthFrame};

use crate::error::CloudError;
use crate::pointcloud::PointCloud;

/// Point cloud density presets, as a sampling stride over the depth grid.
///
/// Every `step`-th row and column of the depth grid produces one point, so
/// the presets trade density for per-cycle cost without touching the filter
/// settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CloudResolution {
    /// One point per depth pixel.
    #[default]
    Full,
    /// One point per 2x2 depth block.
    Half,
    /// One point per 4x4 depth block.
    Quarter,
}

impl CloudResolution {
    /// The sampling stride over the depth grid.
    pub fn step(self) -> usize {
        match self {
            Self::Full => 1,
            Self::Half => 2,
            Self::Quarter => 4,
        }
    }
}

/// Assemble the colored point cloud from projected vertices.
///
/// Walks the raster-ordered vertex array at the given stride, samples the
/// color frame for each visited vertex and writes both into the reused
/// cloud buffer. The buffer is sized to `(height / step) * (width / step)`
/// points and reallocated only when that count changes.
///
/// Color sampling scales the depth coordinate by `color_height /
/// depth_height` on both axes. The horizontal axis deliberately reuses the
/// vertical ratio: correcting it to `color_width / depth_width` shifts the
/// visible geometry-to-color alignment, so the behavior is kept and the
/// sampled coordinates are clamped to the color frame bounds instead.
/// Without a usable color frame the depth frame itself is sampled,
/// normalized against its largest valid sample.
///
/// # Arguments
///
/// * `vertices` - Camera-space vertices, one per depth pixel, raster order.
/// * `depth` - The cleaned depth frame the vertices were projected from.
/// * `color` - The color frame, if the stream delivered one this cycle.
/// * `step` - The sampling stride, at least 1.
/// * `cloud` - The cloud buffer to rebuild.
///
/// # Returns
///
/// Whether the cloud storage had to be reallocated.
pub fn build_cloud(
    vertices: &[Vec3],
    depth: &DepthFrame,
    color: Option<&ColorFrame>,
    step: usize,
    cloud: &mut PointCloud,
) -> Result<bool, CloudError> {
    if step == 0 {
        return Err(CloudError::InvalidStep);
    }

    let depth_width = depth.width();
    let depth_height = depth.height();
    if vertices.len() != depth_width * depth_height {
        return Err(CloudError::VertexCountMismatch {
            expected: depth_width * depth_height,
            actual: vertices.len(),
        });
    }

    let required = (depth_height / step) * (depth_width / step);
    let reallocated = cloud.resize(required);
    if reallocated {
        log::debug!(
            "allocated point cloud storage: {} points for {}x{} depth at step {}",
            required,
            depth_width,
            depth_height,
            step
        );
    }
    if required == 0 {
        return Ok(reallocated);
    }

    let (points, colors) = cloud.parts_mut();
    match color.filter(|c| !c.is_empty()) {
        Some(color) => {
            let color_width = color.width();
            let color_height = color.height();
            let color_data = color.as_slice();
            let color_stride = color_width * 3;
            let scale = color_height as f32 / depth_height as f32;

            for dy in (0..depth_height).step_by(step) {
                let cy = ((dy as f32 * scale) as usize).min(color_height - 1);
                let row = &color_data[cy * color_stride..(cy + 1) * color_stride];
                for dx in (0..depth_width).step_by(step) {
                    let cx = ((dx as f32 * scale) as usize).min(color_width - 1);
                    let src = dy * depth_width + dx;
                    let dst = dy * depth_width / (step * step) + dx / step;
                    // partial strides at the frame edge fall outside the buffer
                    if dst >= required {
                        continue;
                    }
                    points[dst] = vertices[src];
                    let px = &row[cx * 3..cx * 3 + 3];
                    colors[dst] = [
                        px[0] as f32 / 255.0,
                        px[1] as f32 / 255.0,
                        px[2] as f32 / 255.0,
                    ];
                }
            }
        }
        None => {
            // no color stream; shade each point by its own depth sample
            let depth_data = depth.as_slice();
            let max = depth_data.iter().copied().max().unwrap_or(0);
            let inv = if max > 0 { 1.0 / max as f32 } else { 0.0 };

            for dy in (0..depth_height).step_by(step) {
                for dx in (0..depth_width).step_by(step) {
                    let src = dy * depth_width + dx;
                    let dst = dy * depth_width / (step * step) + dx / step;
                    if dst >= required {
                        continue;
                    }
                    points[dst] = vertices[src];
                    let gray = depth_data[src] as f32 * inv;
                    colors[dst] = [gray, gray, gray];
                }
            }
        }
    }

    Ok(reallocated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthcloud_image::{Frame, FrameSize};

    fn depth_frame(width: usize, height: usize, data: Vec<u16>) -> DepthFrame {
        DepthFrame::new(FrameSize { width, height }, data).unwrap()
    }

    fn color_frame(width: usize, height: usize, data: Vec<u8>) -> ColorFrame {
        ColorFrame::new(FrameSize { width, height }, data).unwrap()
    }

    // raster-indexed vertices so tests can tell them apart
    fn vertices(width: usize, height: usize) -> Vec<Vec3> {
        (0..width * height).map(|i| Vec3::splat(i as f32)).collect()
    }

    #[test]
    fn length_matches_the_stride_formula() -> Result<(), CloudError> {
        let cases = [
            (4usize, 2usize, 1usize, 8usize),
            (6, 4, 2, 6),
            (640, 480, 4, 19200),
            (5, 5, 2, 4),
        ];
        for (w, h, step, expected) in cases {
            let depth = depth_frame(w, h, vec![1000; w * h]);
            let mut cloud = PointCloud::new();
            build_cloud(&vertices(w, h), &depth, None, step, &mut cloud)?;
            assert_eq!(cloud.len(), expected, "{}x{} step {}", w, h, step);
        }
        Ok(())
    }

    #[test]
    fn full_resolution_indexing() -> Result<(), CloudError> {
        // 4x2 depth, unit scale: the vertex of depth pixel (2, 1) lands at
        // buffer index 6 with the color sampled at (2, 1)
        let depth = depth_frame(4, 2, vec![1000; 8]);
        let mut color_data = vec![0u8; 4 * 2 * 3];
        let idx = (1 * 4 + 2) * 3;
        color_data[idx..idx + 3].copy_from_slice(&[255, 128, 0]);
        let color = color_frame(4, 2, color_data);

        let mut cloud = PointCloud::new();
        build_cloud(&vertices(4, 2), &depth, Some(&color), 1, &mut cloud)?;

        assert_eq!(cloud.len(), 8);
        assert_eq!(cloud.points()[6], Vec3::splat(6.0));
        let c = cloud.colors()[6];
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 128.0 / 255.0);
        assert_eq!(c[2], 0.0);
        Ok(())
    }

    #[test]
    fn strided_build_visits_every_other_pixel() -> Result<(), CloudError> {
        let depth = depth_frame(6, 4, vec![1000; 24]);
        let mut cloud = PointCloud::new();
        build_cloud(&vertices(6, 4), &depth, None, 2, &mut cloud)?;

        assert_eq!(cloud.len(), 6);
        // rows 0 and 2, columns 0, 2 and 4 of the depth grid, in order
        let expected: Vec<f32> = vec![0.0, 2.0, 4.0, 12.0, 14.0, 16.0];
        let got: Vec<f32> = cloud.points().iter().map(|v| v.x).collect();
        assert_eq!(got, expected);
        Ok(())
    }

    #[test]
    fn stable_geometry_reuses_storage() -> Result<(), CloudError> {
        let depth = depth_frame(6, 4, vec![1000; 24]);
        let verts = vertices(6, 4);
        let mut cloud = PointCloud::new();

        let first = build_cloud(&verts, &depth, None, 2, &mut cloud)?;
        assert!(first);
        let ptr = cloud.points().as_ptr();

        let second = build_cloud(&verts, &depth, None, 2, &mut cloud)?;
        assert!(!second);
        assert_eq!(cloud.points().as_ptr(), ptr);

        // a different stride changes the count and forces a reallocation
        let third = build_cloud(&verts, &depth, None, 1, &mut cloud)?;
        assert!(third);
        assert_eq!(cloud.len(), 24);
        Ok(())
    }

    #[test]
    fn rebuild_is_idempotent() -> Result<(), CloudError> {
        let depth = depth_frame(4, 4, (1..=16).map(|d| d * 100).collect());
        let color = color_frame(4, 4, (0..48).map(|i| i as u8).collect());
        let verts = vertices(4, 4);

        let mut first = PointCloud::new();
        build_cloud(&verts, &depth, Some(&color), 2, &mut first)?;
        let mut second = first.clone();
        build_cloud(&verts, &depth, Some(&color), 2, &mut second)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn horizontal_sampling_reuses_vertical_ratio() -> Result<(), CloudError> {
        // color twice as wide as depth: with the preserved behavior the
        // horizontal scale stays 1, so only the left half is ever sampled
        let depth = depth_frame(4, 2, vec![1000; 8]);
        let mut color_data = vec![0u8; 8 * 2 * 3];
        for x in 0..8 {
            color_data[x * 3] = (x * 10) as u8;
        }
        let color = color_frame(8, 2, color_data);

        let mut cloud = PointCloud::new();
        build_cloud(&vertices(4, 2), &depth, Some(&color), 1, &mut cloud)?;

        assert_eq!(cloud.colors()[3][0], 30.0 / 255.0);
        Ok(())
    }

    #[test]
    fn color_coordinates_stay_in_bounds() -> Result<(), CloudError> {
        // a color frame narrower than the vertical ratio implies: the
        // preserved scale reuse would sample past the right edge without
        // the clamp
        let depth = depth_frame(8, 4, vec![1000; 32]);
        let color = color_frame(2, 4, vec![50u8; 2 * 4 * 3]);

        let mut cloud = PointCloud::new();
        build_cloud(&vertices(8, 4), &depth, Some(&color), 1, &mut cloud)?;
        assert!(cloud.colors().iter().all(|c| c[0] == 50.0 / 255.0));
        Ok(())
    }

    #[test]
    fn missing_color_shades_from_depth() -> Result<(), CloudError> {
        let depth = depth_frame(2, 1, vec![500, 1000]);
        let mut cloud = PointCloud::new();
        build_cloud(&vertices(2, 1), &depth, None, 1, &mut cloud)?;

        assert_eq!(cloud.colors()[0], [0.5, 0.5, 0.5]);
        assert_eq!(cloud.colors()[1], [1.0, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn empty_color_frame_falls_back_to_depth() -> Result<(), CloudError> {
        let depth = depth_frame(2, 1, vec![1000, 1000]);
        let empty = ColorFrame::empty();
        let mut cloud = PointCloud::new();
        build_cloud(&vertices(2, 1), &depth, Some(&empty), 1, &mut cloud)?;
        assert_eq!(cloud.colors()[0], [1.0, 1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn all_hole_depth_shades_black() -> Result<(), CloudError> {
        let depth = depth_frame(2, 1, vec![0, 0]);
        let mut cloud = PointCloud::new();
        build_cloud(&vertices(2, 1), &depth, None, 1, &mut cloud)?;
        assert_eq!(cloud.colors()[0], [0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn vertex_mismatch_is_rejected() {
        let depth = depth_frame(4, 2, vec![1000; 8]);
        let mut cloud = PointCloud::new();
        let result = build_cloud(&vertices(4, 1), &depth, None, 1, &mut cloud);
        assert!(matches!(
            result,
            Err(CloudError::VertexCountMismatch {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn zero_step_is_rejected() {
        let depth = depth_frame(4, 2, vec![1000; 8]);
        let mut cloud = PointCloud::new();
        let result = build_cloud(&vertices(4, 2), &depth, None, 0, &mut cloud);
        assert!(matches!(result, Err(CloudError::InvalidStep)));
    }

    #[test]
    fn resolution_presets() {
        assert_eq!(CloudResolution::Full.step(), 1);
        assert_eq!(CloudResolution::Half.step(), 2);
        assert_eq!(CloudResolution::Quarter.step(), 4);
        assert_eq!(CloudResolution::default(), CloudResolution::Full);
    }
}
