#![deny(missing_docs)]
//! Frame containers for depth and color sensor streams

/// frame representation for depth-camera streams.
pub mod frame;

/// Error types for the frame module.
pub mod error;

/// Operations on frame data.
pub mod ops;

pub use crate::error::FrameError;
pub use crate::frame::{ColorFrame, DepthFrame, Frame, FrameSize};
