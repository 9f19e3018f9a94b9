#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use depthcloud_image as image;

#[doc(inline)]
pub use depthcloud_filters as filters;

#[doc(inline)]
pub use depthcloud_3d as d3;

#[doc(inline)]
pub use depthcloud_engine as engine;
