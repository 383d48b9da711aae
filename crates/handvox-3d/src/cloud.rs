use crate::camera::PinholeIntrinsics;
use crate::frame::DepthFrame;

/// Back-project a cropped depth frame into a camera-space point cloud.
///
/// Pixels are scanned row-major over the bounding box and back-projected
/// with a pinhole model centered on the frame's own image midpoint. Points
/// whose three coordinates are all zero carry the "no depth recorded"
/// sentinel and are dropped; surviving points keep scan order.
///
/// # Arguments
///
/// * `frame` - The cropped depth frame.
/// * `focal` - The sensor focal length in pixels.
///
/// # Returns
///
/// The valid points in millimeters, at most `bbox_width * bbox_height`.
pub fn reconstruct_point_cloud(frame: &DepthFrame, focal: f32) -> Vec<[f32; 3]> {
    let intrinsics = PinholeIntrinsics::centered_on(focal, frame);
    let bbox_width = frame.bbox_width() as usize;
    let bbox_height = frame.bbox_height() as usize;
    let depth = frame.depth();

    let mut points = Vec::with_capacity(depth.len());
    for h in 0..bbox_height {
        for w in 0..bbox_width {
            let d = depth[h * bbox_width + w];
            let point = intrinsics.back_project(
                (w as u32 + frame.bbox_left) as f32,
                (h as u32 + frame.bbox_top) as f32,
                d,
            );
            if point[0] == 0.0 && point[1] == 0.0 && point[2] == 0.0 {
                continue;
            }
            points.push(point);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use approx::assert_relative_eq;

    #[test]
    fn symmetric_bbox_reconstruction() -> Result<(), GeometryError> {
        // 2x2 bbox centered on a 4x4 image, constant depth
        let frame = DepthFrame::new(4, 4, 1, 1, 3, 3, vec![100.0; 4])?;
        let points = reconstruct_point_cloud(&frame, 241.42);

        assert_eq!(points.len(), 4);
        for point in &points {
            assert_relative_eq!(point[2], -100.0);
        }
        // pixel offsets from the image center are -1 and 0 on both axes
        let a = 100.0 / 241.42;
        assert_relative_eq!(points[0][0], -a);
        assert_relative_eq!(points[0][1], a);
        assert_relative_eq!(points[1][0], 0.0);
        assert_relative_eq!(points[1][1], a);
        assert_relative_eq!(points[2][0], -a);
        assert_relative_eq!(points[2][1], 0.0);
        assert_relative_eq!(points[3][0], 0.0);
        assert_relative_eq!(points[3][1], 0.0);
        Ok(())
    }

    #[test]
    fn drops_zero_depth_pixels() -> Result<(), GeometryError> {
        let frame = DepthFrame::new(320, 240, 100, 80, 102, 82, vec![350.0, 0.0, 0.0, 350.0])?;
        let points = reconstruct_point_cloud(&frame, 241.42);
        assert_eq!(points.len(), 2);
        Ok(())
    }

    #[test]
    fn reconstruction_is_pure() -> Result<(), GeometryError> {
        let depth = (0..400).map(|i| 150.0 + (i % 7) as f32).collect::<Vec<_>>();
        let frame = DepthFrame::new(320, 240, 100, 80, 120, 100, depth)?;
        let first = reconstruct_point_cloud(&frame, 241.42);
        let second = reconstruct_point_cloud(&frame, 241.42);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn full_bbox_survives_with_nonzero_depth() -> Result<(), GeometryError> {
        let frame = DepthFrame::new(320, 240, 100, 80, 120, 100, vec![150.0; 400])?;
        let points = reconstruct_point_cloud(&frame, 241.42);
        assert_eq!(points.len(), 400);
        Ok(())
    }
}
