use crate::frame::DepthFrame;

/// Focal length in pixels of the MSRA depth sensor.
pub const FOCAL_MSRA: f32 = 241.42;

/// Principal point of the MSRA depth sensor (320x240 resolution).
pub const SENSOR_CENTER: (f32, f32) = (160.0, 120.0);

/// Intrinsic parameters of the fixed pinhole depth camera.
///
/// The sensor convention places the camera at z = 0 looking toward negative
/// z, so reconstructed points carry negative z and the projection
/// coefficient is `-focal / z`.
#[derive(Debug, Clone, Copy)]
pub struct PinholeIntrinsics {
    /// The focal length in pixels.
    pub focal: f32,
    /// The principal point x coordinate in pixels.
    pub cx: f32,
    /// The principal point y coordinate in pixels.
    pub cy: f32,
}

impl PinholeIntrinsics {
    /// Create intrinsics with an explicit principal point.
    pub fn new(focal: f32, cx: f32, cy: f32) -> Self {
        Self { focal, cx, cy }
    }

    /// The MSRA sensor intrinsics.
    pub fn msra() -> Self {
        Self::new(FOCAL_MSRA, SENSOR_CENTER.0, SENSOR_CENTER.1)
    }

    /// Intrinsics centered on a frame's own image midpoint, used when
    /// back-projecting bounding-box pixels during reconstruction.
    pub fn centered_on(focal: f32, frame: &DepthFrame) -> Self {
        Self::new(
            focal,
            frame.image_width as f32 / 2.0,
            frame.image_height as f32 / 2.0,
        )
    }

    /// Back-project a sensor pixel with a depth sample to a camera-space
    /// point in millimeters.
    #[inline]
    pub fn back_project(&self, pixel_x: f32, pixel_y: f32, depth: f32) -> [f32; 3] {
        let coeff = depth / self.focal;
        [
            (pixel_x - self.cx) * coeff,
            -(pixel_y - self.cy) * coeff,
            -depth,
        ]
    }

    /// Project a camera-space point to integer sensor pixel coordinates.
    ///
    /// Returns `None` when the point sits on the camera plane (z == 0) or
    /// the projection is not finite.
    #[inline]
    pub fn project(&self, point: &[f32; 3]) -> Option<(i64, i64)> {
        if point[2] == 0.0 {
            return None;
        }
        let coeff = -self.focal / point[2];
        let u = (point[0] * coeff + self.cx).floor();
        let v = (-point[1] * coeff + self.cy).floor();
        if !u.is_finite() || !v.is_finite() {
            return None;
        }
        Some((u as i64, v as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn back_project_sign_convention() {
        let intrinsics = PinholeIntrinsics::msra();
        let point = intrinsics.back_project(160.0, 120.0, 500.0);
        assert_relative_eq!(point[0], 0.0);
        assert_relative_eq!(point[1], 0.0);
        assert_relative_eq!(point[2], -500.0);

        // right of center maps to positive x, below center to negative y
        let point = intrinsics.back_project(200.0, 150.0, 500.0);
        assert!(point[0] > 0.0);
        assert!(point[1] < 0.0);
    }

    #[test]
    fn project_round_trips_pixel_centers() {
        let intrinsics = PinholeIntrinsics::msra();
        // depth equal to the focal length keeps both coefficients at
        // exactly 1.0, so the floor cannot slip below the source pixel
        for (px, py) in [(100, 80), (160, 120), (259, 201)] {
            let point = intrinsics.back_project(px as f32, py as f32, FOCAL_MSRA);
            let (u, v) = intrinsics.project(&point).unwrap();
            assert_eq!((u, v), (px, py));
        }
    }

    #[test]
    fn project_guards_zero_depth() {
        let intrinsics = PinholeIntrinsics::msra();
        assert!(intrinsics.project(&[10.0, -4.0, 0.0]).is_none());
    }
}
