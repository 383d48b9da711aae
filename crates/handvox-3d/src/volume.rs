use crate::camera::PinholeIntrinsics;
use crate::error::GeometryError;
use crate::frame::DepthFrame;

/// Number of voxels along each axis of the TSDF grid.
pub const VOXEL_RESOLUTION: usize = 32;

/// Number of signed-distance channels stored per voxel (x, y, z components).
pub const TSDF_CHANNELS: usize = 3;

/// Axis-aligned bounding volume of a point cloud and the cubical voxel grid
/// derived from it.
///
/// The grid is always a cube sized to the longest per-axis extent. Because a
/// z coordinate of exactly zero is the "no depth" sentinel, such samples are
/// excluded from the z reduction so a stray degenerate point cannot inflate
/// the bounds to the camera plane.
#[derive(Debug, Clone, Copy)]
pub struct VolumeBounds {
    /// Per-axis minimum of the cloud.
    pub point_min: [f32; 3],
    /// Per-axis maximum of the cloud.
    pub point_max: [f32; 3],
    /// Midpoint of the bounds.
    pub mid_point: [f32; 3],
    /// The largest per-axis extent; edge length of the cubical grid.
    pub max_length: f32,
    /// Edge length of one voxel.
    pub voxel_len: f32,
    /// Truncation distance of the signed distance field (three voxels).
    pub truncation: f32,
    /// Camera-space center of voxel (0, 0, 0), half a voxel inside the
    /// cube's minimum corner.
    pub origin: [f32; 3],
}

impl VolumeBounds {
    /// Estimate the bounding volume of a point cloud.
    ///
    /// A cloud with zero extent is not an error: the returned bounds carry
    /// `max_length == 0` and rasterization over them yields the default
    /// (all-zero) volume.
    pub fn from_points(points: &[[f32; 3]]) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::EmptyPointCloud);
        }

        let mut point_min = [f32::MAX; 3];
        let mut point_max = [f32::MIN; 3];
        let mut any_z = false;
        for point in points {
            for axis in 0..2 {
                point_min[axis] = point_min[axis].min(point[axis]);
                point_max[axis] = point_max[axis].max(point[axis]);
            }
            if point[2] != 0.0 {
                point_min[2] = point_min[2].min(point[2]);
                point_max[2] = point_max[2].max(point[2]);
                any_z = true;
            }
        }
        if !any_z {
            return Err(GeometryError::DegenerateDepth);
        }

        let mid_point = [
            (point_max[0] + point_min[0]) / 2.0,
            (point_max[1] + point_min[1]) / 2.0,
            (point_max[2] + point_min[2]) / 2.0,
        ];
        let max_length = (point_max[0] - point_min[0])
            .max(point_max[1] - point_min[1])
            .max(point_max[2] - point_min[2]);
        let voxel_len = max_length / VOXEL_RESOLUTION as f32;
        let truncation = voxel_len * 3.0;
        let origin = [
            mid_point[0] - max_length / 2.0 + voxel_len / 2.0,
            mid_point[1] - max_length / 2.0 + voxel_len / 2.0,
            mid_point[2] - max_length / 2.0 + voxel_len / 2.0,
        ];

        Ok(Self {
            point_min,
            point_max,
            mid_point,
            max_length,
            voxel_len,
            truncation,
            origin,
        })
    }

    /// Camera-space center of the voxel at the given grid coordinates.
    #[inline]
    pub fn voxel_center(&self, x: usize, y: usize, z: usize) -> [f32; 3] {
        [
            self.origin[0] + x as f32 * self.voxel_len,
            self.origin[1] + y as f32 * self.voxel_len,
            self.origin[2] + z as f32 * self.voxel_len,
        ]
    }
}

/// A projective truncated signed distance field over a 3x32x32x32 grid.
///
/// Values live in `[-1, 1]`, stored channel-major in a flat arena (channel 0
/// holds the x components). Voxels never visited by the rasterizer keep the
/// default value 0.
#[derive(Debug, Clone)]
pub struct TsdfVolume {
    data: Vec<f32>,
}

impl Default for TsdfVolume {
    fn default() -> Self {
        Self {
            data: vec![0.0; TSDF_CHANNELS * VOXEL_RESOLUTION.pow(3)],
        }
    }
}

impl TsdfVolume {
    #[inline]
    fn index(channel: usize, x: usize, y: usize, z: usize) -> usize {
        ((channel * VOXEL_RESOLUTION + x) * VOXEL_RESOLUTION + y) * VOXEL_RESOLUTION + z
    }

    /// Get one signed-distance component of a voxel.
    #[inline]
    pub fn value(&self, channel: usize, x: usize, y: usize, z: usize) -> f32 {
        self.data[Self::index(channel, x, y, z)]
    }

    /// Store the three signed-distance components of a voxel.
    #[inline]
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, components: [f32; 3]) {
        for (channel, component) in components.iter().enumerate() {
            self.data[Self::index(channel, x, y, z)] = *component;
        }
    }

    /// The flat channel-major buffer of the volume.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// One full channel of the volume.
    pub fn channel(&self, channel: usize) -> &[f32] {
        let len = VOXEL_RESOLUTION.pow(3);
        &self.data[channel * len..(channel + 1) * len]
    }
}

/// Rasterize a projective per-axis TSDF over the voxel grid of `bounds`.
///
/// Each voxel center is projected into the sensor image; voxels landing
/// outside the frame's bounding box, or on a pixel whose depth magnitude is
/// below 1 (no depth recorded), keep the default value. Otherwise the pixel
/// is back-projected to its surface point and the per-axis absolute
/// distances are divided by the truncation distance. When the Euclidean
/// combination of the three ratios exceeds 1 the voxel saturates to
/// (1, 1, 1) as a whole, not per axis. All three components flip sign when
/// the surface lies behind the voxel (`world_z > voxel_z`, camera side).
///
/// Degenerate bounds (`voxel_len <= 0`) and voxel centers on the camera
/// plane are guarded: the affected voxels stay at the default value.
pub fn rasterize_tsdf(
    frame: &DepthFrame,
    bounds: &VolumeBounds,
    intrinsics: &PinholeIntrinsics,
) -> TsdfVolume {
    let mut volume = TsdfVolume::default();

    if !(bounds.voxel_len > 0.0) || !bounds.truncation.is_finite() {
        log::debug!(
            "degenerate bounds (voxel_len = {}); returning default volume",
            bounds.voxel_len
        );
        return volume;
    }

    for x in 0..VOXEL_RESOLUTION {
        for y in 0..VOXEL_RESOLUTION {
            for z in 0..VOXEL_RESOLUTION {
                let voxel = bounds.voxel_center(x, y, z);

                let Some((pixel_x, pixel_y)) = intrinsics.project(&voxel) else {
                    continue;
                };
                let Some(pixel_depth) = frame.depth_at(pixel_x, pixel_y) else {
                    continue;
                };
                if pixel_depth.abs() < 1.0 {
                    continue;
                }

                // closest surface point along this voxel's viewing ray
                let world = intrinsics.back_project(pixel_x as f32, pixel_y as f32, pixel_depth);

                let mut tsdf = [
                    (voxel[0] - world[0]).abs() / bounds.truncation,
                    (voxel[1] - world[1]).abs() / bounds.truncation,
                    (voxel[2] - world[2]).abs() / bounds.truncation,
                ];
                let distance_to_surface =
                    (tsdf[0] * tsdf[0] + tsdf[1] * tsdf[1] + tsdf[2] * tsdf[2]).sqrt();
                if distance_to_surface > 1.0 {
                    tsdf = [1.0, 1.0, 1.0];
                }
                for component in tsdf.iter_mut() {
                    *component = component.min(1.0);
                }
                if world[2] > voxel[2] {
                    for component in tsdf.iter_mut() {
                        *component = -*component;
                    }
                }

                volume.set_voxel(x, y, z, tsdf);
            }
        }
    }

    volume
}
