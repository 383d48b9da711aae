use rand::Rng;

use crate::error::GeometryError;

/// Default number of points in a normalized cloud.
pub const POINT_NUM: usize = 6000;

/// Resample a point cloud to an exact cardinality.
///
/// When the cloud is shorter than `count`, every original point is kept in
/// order and the tail is filled with indices drawn uniformly at random with
/// replacement. When it is at least `count` long, all `count` output points
/// are drawn with replacement, so duplicates are possible in both branches.
/// The empirical point distribution is preserved either way.
///
/// # Arguments
///
/// * `points` - The source cloud; must contain at least one point.
/// * `count` - The target cardinality.
/// * `rng` - Random source; seed it for reproducible output.
pub fn resample_point_cloud(
    points: &[[f32; 3]],
    count: usize,
    rng: &mut impl Rng,
) -> Result<Vec<[f32; 3]>, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointCloud);
    }

    let mut resampled = Vec::with_capacity(count);
    if points.len() < count {
        resampled.extend_from_slice(points);
        for _ in points.len()..count {
            resampled.push(points[rng.random_range(0..points.len())]);
        }
    } else {
        for _ in 0..count {
            resampled.push(points[rng.random_range(0..points.len())]);
        }
    }
    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_cloud(len: usize) -> Vec<[f32; 3]> {
        (0..len)
            .map(|i| [i as f32, -(i as f32), 100.0 + i as f32])
            .collect()
    }

    #[test]
    fn upsampling_keeps_originals_in_order() -> Result<(), GeometryError> {
        let points = sample_cloud(400);
        let mut rng = StdRng::seed_from_u64(7);
        let resampled = resample_point_cloud(&points, POINT_NUM, &mut rng)?;

        assert_eq!(resampled.len(), POINT_NUM);
        assert_eq!(&resampled[..400], &points[..]);
        for point in &resampled[400..] {
            assert!(points.contains(point));
        }
        Ok(())
    }

    #[test]
    fn downsampling_draws_only_source_points() -> Result<(), GeometryError> {
        let points = sample_cloud(10_000);
        let mut rng = StdRng::seed_from_u64(7);
        let resampled = resample_point_cloud(&points, 64, &mut rng)?;

        assert_eq!(resampled.len(), 64);
        for point in &resampled {
            assert!(points.contains(point));
        }
        Ok(())
    }

    #[test]
    fn seeded_resampling_is_reproducible() -> Result<(), GeometryError> {
        let points = sample_cloud(100);
        let first = resample_point_cloud(&points, 500, &mut StdRng::seed_from_u64(42))?;
        let second = resample_point_cloud(&points, 500, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn empty_cloud_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = resample_point_cloud(&[], POINT_NUM, &mut rng);
        assert!(matches!(result, Err(GeometryError::EmptyPointCloud)));
    }
}
