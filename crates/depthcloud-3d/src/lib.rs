#![deny(missing_docs)]
//! Depth projection and colored point cloud construction

/// Pinhole sensor intrinsics.
pub mod camera;

/// Colored point cloud assembly from projected vertices.
pub mod cloud;

/// Error types for the 3d module.
pub mod error;

/// Point cloud buffer.
pub mod pointcloud;

/// Depth to camera-space projection.
pub mod projector;

pub use crate::camera::PinholeIntrinsics;
pub use crate::cloud::{build_cloud, CloudResolution};
pub use crate::error::CloudError;
pub use crate::pointcloud::PointCloud;
pub use crate::projector::{DepthProjector, PinholeProjector};
