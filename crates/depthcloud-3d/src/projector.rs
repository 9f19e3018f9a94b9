use glam::Vec3;

use depthcloud_image::DepthFrame;

use crate::camera::PinholeIntrinsics;
use crate::error::CloudError;

/// The seam to the sensor's intrinsic projection primitive.
///
/// Implementations convert a cleaned depth frame into camera-space
/// vertices, one per depth pixel, in raster order: after a successful call
/// `vertices[y * width + x]` corresponds to depth pixel (x, y). Invalid
/// depth samples yield [`Vec3::ZERO`].
pub trait DepthProjector {
    /// Project a depth frame into the reused vertex buffer.
    fn project(&self, depth: &DepthFrame, vertices: &mut Vec<Vec3>) -> Result<(), CloudError>;
}

/// Pinhole deprojection from the sensor's stored calibration.
#[derive(Debug, Clone)]
pub struct PinholeProjector {
    intrinsics: PinholeIntrinsics,
}

impl PinholeProjector {
    /// Create a projector from sensor intrinsics.
    pub fn new(intrinsics: PinholeIntrinsics) -> Self {
        Self { intrinsics }
    }

    /// The calibration this projector was created with.
    pub fn intrinsics(&self) -> &PinholeIntrinsics {
        &self.intrinsics
    }
}

impl DepthProjector for PinholeProjector {
    fn project(&self, depth: &DepthFrame, vertices: &mut Vec<Vec3>) -> Result<(), CloudError> {
        let width = depth.width();
        let height = depth.height();

        vertices.clear();
        vertices.resize(width * height, Vec3::ZERO);
        if depth.is_empty() {
            return Ok(());
        }

        // the frame may have been decimated upstream of the projector
        let intr = self.intrinsics.scaled_to(depth.size());
        let (fx, fy) = intr.focal_length;
        let (ppx, ppy) = intr.principal_point;
        if !(fx > 0.0 && fy > 0.0) {
            return Err(CloudError::InvalidIntrinsics(fx, fy));
        }

        let data = depth.as_slice();
        for y in 0..height {
            for x in 0..width {
                let d = data[y * width + x];
                if d == 0 {
                    continue;
                }
                let z = d as f32 * intr.depth_scale;
                vertices[y * width + x] = Vec3::new(
                    (x as f32 - ppx) * z / fx,
                    (y as f32 - ppy) * z / fy,
                    z,
                );
            }
        }

        Ok(())
    }
}
