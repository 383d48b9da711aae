use crate::error::GeometryError;

/// A depth image cropped to the hand bounding box of a single frame.
///
/// The depth buffer covers only the bounding box region, stored row-major
/// with `bbox_width * bbox_height` samples in millimeters. A sample of 0.0
/// means "no depth recorded" at that pixel.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    /// The full sensor image width in pixels.
    pub image_width: u32,
    /// The full sensor image height in pixels.
    pub image_height: u32,
    /// Left edge of the bounding box (inclusive), in sensor pixels.
    pub bbox_left: u32,
    /// Top edge of the bounding box (inclusive), in sensor pixels.
    pub bbox_top: u32,
    /// Right edge of the bounding box (exclusive), in sensor pixels.
    pub bbox_right: u32,
    /// Bottom edge of the bounding box (exclusive), in sensor pixels.
    pub bbox_bottom: u32,
    // Row-major depth samples over the bounding box.
    depth: Vec<f32>,
}

impl DepthFrame {
    /// Create a new depth frame, validating the bounding box edge order and
    /// the depth buffer length against the bounding box area.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        image_width: u32,
        image_height: u32,
        bbox_left: u32,
        bbox_top: u32,
        bbox_right: u32,
        bbox_bottom: u32,
        depth: Vec<f32>,
    ) -> Result<Self, GeometryError> {
        if bbox_right < bbox_left || bbox_bottom < bbox_top {
            return Err(GeometryError::InvertedBoundingBox(
                bbox_left,
                bbox_top,
                bbox_right,
                bbox_bottom,
            ));
        }
        let bbox_width = (bbox_right - bbox_left) as usize;
        let bbox_height = (bbox_bottom - bbox_top) as usize;
        let expected = bbox_width * bbox_height;
        if depth.len() != expected {
            return Err(GeometryError::InvalidDepthLength(depth.len(), expected));
        }
        Ok(Self {
            image_width,
            image_height,
            bbox_left,
            bbox_top,
            bbox_right,
            bbox_bottom,
            depth,
        })
    }

    /// The bounding box width in pixels.
    #[inline]
    pub fn bbox_width(&self) -> u32 {
        self.bbox_right - self.bbox_left
    }

    /// The bounding box height in pixels.
    #[inline]
    pub fn bbox_height(&self) -> u32 {
        self.bbox_bottom - self.bbox_top
    }

    /// Get as reference the depth samples over the bounding box.
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Get the depth at an absolute sensor pixel, or `None` when the pixel
    /// falls outside the bounding box.
    #[inline]
    pub fn depth_at(&self, pixel_x: i64, pixel_y: i64) -> Option<f32> {
        if pixel_x < self.bbox_left as i64
            || pixel_x >= self.bbox_right as i64
            || pixel_y < self.bbox_top as i64
            || pixel_y >= self.bbox_bottom as i64
        {
            return None;
        }
        let idx = (pixel_y - self.bbox_top as i64) as usize * self.bbox_width() as usize
            + (pixel_x - self.bbox_left as i64) as usize;
        Some(self.depth[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_depth_length() {
        let result = DepthFrame::new(320, 240, 100, 80, 110, 90, vec![0.0; 42]);
        assert!(matches!(
            result,
            Err(GeometryError::InvalidDepthLength(42, 100))
        ));
    }

    #[test]
    fn rejects_inverted_bbox_edges() {
        // an empty depth buffer must not make an inverted bbox pass
        let result = DepthFrame::new(320, 240, 120, 80, 100, 100, vec![]);
        assert!(matches!(
            result,
            Err(GeometryError::InvertedBoundingBox(120, 80, 100, 100))
        ));

        let result = DepthFrame::new(320, 240, 100, 100, 120, 80, vec![]);
        assert!(matches!(
            result,
            Err(GeometryError::InvertedBoundingBox(100, 100, 120, 80))
        ));
    }

    #[test]
    fn depth_lookup_uses_absolute_pixels() -> Result<(), GeometryError> {
        let mut depth = vec![0.0; 4];
        // second row, second column of the 2x2 bbox
        depth[3] = 321.0;
        let frame = DepthFrame::new(320, 240, 10, 20, 12, 22, depth)?;

        assert_eq!(frame.bbox_width(), 2);
        assert_eq!(frame.bbox_height(), 2);
        assert_eq!(frame.depth_at(11, 21), Some(321.0));
        assert_eq!(frame.depth_at(10, 20), Some(0.0));

        // outside the bounding box on every side
        assert_eq!(frame.depth_at(9, 21), None);
        assert_eq!(frame.depth_at(12, 21), None);
        assert_eq!(frame.depth_at(11, 19), None);
        assert_eq!(frame.depth_at(11, 22), None);
        Ok(())
    }
}
