use rand::Rng;

use crate::camera::PinholeIntrinsics;
use crate::cloud::reconstruct_point_cloud;
use crate::error::GeometryError;
use crate::frame::DepthFrame;
use crate::resample::resample_point_cloud;
use crate::volume::{rasterize_tsdf, TsdfVolume, VolumeBounds};

/// Training-ready features extracted from one depth frame.
#[derive(Debug, Clone)]
pub struct FrameFeatures {
    /// Fixed-cardinality point cloud in camera millimeters.
    pub points: Vec<[f32; 3]>,
    /// Projective TSDF volume over the cloud's bounding cube.
    pub tsdf: TsdfVolume,
    /// Edge length of the bounding cube.
    pub max_length: f32,
    /// Midpoint of the cloud bounds.
    pub mid_point: [f32; 3],
}

/// Run the full reconstruction pipeline on one depth frame.
///
/// Stages run in order: back-project the cropped depth image into a point
/// cloud, resample it to exactly `point_count` points, estimate the bounding
/// volume, and rasterize the TSDF grid. Each stage is a pure function of the
/// previous one; the only nondeterminism is the resampling draw from `rng`.
///
/// Frames whose depth image yields no valid point, or whose depth samples
/// are all zero, fail with a [`GeometryError`] and should be skipped by the
/// caller.
pub fn process_frame(
    frame: &DepthFrame,
    intrinsics: &PinholeIntrinsics,
    point_count: usize,
    rng: &mut impl Rng,
) -> Result<FrameFeatures, GeometryError> {
    let raw_points = reconstruct_point_cloud(frame, intrinsics.focal);
    log::debug!(
        "reconstructed {} of {} bbox pixels",
        raw_points.len(),
        frame.depth().len()
    );

    let points = resample_point_cloud(&raw_points, point_count, rng)?;
    let bounds = VolumeBounds::from_points(&points)?;
    let tsdf = rasterize_tsdf(frame, &bounds, intrinsics);

    Ok(FrameFeatures {
        points,
        tsdf,
        max_length: bounds.max_length,
        mid_point: bounds.mid_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pipeline_produces_fixed_cardinality_features() -> Result<(), GeometryError> {
        let depth = (0..400)
            .map(|i| 480.0 + ((i * 37) % 53) as f32)
            .collect::<Vec<_>>();
        let frame = DepthFrame::new(320, 240, 150, 110, 170, 130, depth)?;
        let mut rng = StdRng::seed_from_u64(3);

        let features = process_frame(&frame, &PinholeIntrinsics::msra(), 6000, &mut rng)?;

        assert_eq!(features.points.len(), 6000);
        // 400 valid pixels upsample in place, originals first
        let originals =
            crate::cloud::reconstruct_point_cloud(&frame, crate::camera::FOCAL_MSRA);
        assert_eq!(&features.points[..400], &originals[..]);

        assert!(features.max_length > 0.0);
        assert!(features
            .tsdf
            .as_slice()
            .iter()
            .all(|&v| (-1.0..=1.0).contains(&v)));
        Ok(())
    }

    #[test]
    fn all_zero_frame_is_rejected() -> Result<(), GeometryError> {
        let frame = DepthFrame::new(320, 240, 100, 80, 120, 100, vec![0.0; 400])?;
        let mut rng = StdRng::seed_from_u64(3);
        let result = process_frame(&frame, &PinholeIntrinsics::msra(), 6000, &mut rng);
        assert!(matches!(result, Err(GeometryError::EmptyPointCloud)));
        Ok(())
    }
}
