#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pinhole camera model for the fixed depth sensor.
pub mod camera;

/// Point cloud reconstruction from cropped depth frames.
pub mod cloud;

/// Error types for the crate.
pub mod error;

/// Cropped depth frame model.
pub mod frame;

/// Per-frame processing pipeline.
pub mod ops;

/// Fixed-cardinality point cloud resampling.
pub mod resample;

/// Volume bounds estimation and projective TSDF rasterization.
pub mod volume;
