/// An error type for the geometry pipeline.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    /// Error when the depth buffer does not match the bounding box area.
    #[error("Depth buffer length ({0}) does not match the bounding box area ({1})")]
    InvalidDepthLength(usize, usize),

    /// Error when a bounding box edge order is inverted.
    #[error("Bounding box edges are inverted: left {0}, top {1}, right {2}, bottom {3}")]
    InvertedBoundingBox(u32, u32, u32, u32),

    /// Error when a point cloud has no valid points.
    #[error("Point cloud has no valid points")]
    EmptyPointCloud,

    /// Error when every depth sample is the zero sentinel.
    #[error("Every z coordinate is the zero sentinel; bounds are undefined")]
    DegenerateDepth,
}
