//! Latitude to pixel mapping for a north-polar azimuthal equidistant map.

/// Pixels per degree of latitude on the bundled base map.
pub const DEFAULT_PIXELS_PER_DEGREE: f64 = 12.84;

/// North pole at the image center; latitude circles are concentric with
/// radius proportional to colatitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    pub center_x: f64,
    pub center_y: f64,
    pub pixels_per_degree: f64,
}

impl PolarProjection {
    pub fn new(center_x: f64, center_y: f64, pixels_per_degree: f64) -> Self {
        Self {
            center_x,
            center_y,
            pixels_per_degree,
        }
    }

    /// Projection centered on an image of the given size.
    pub fn for_image(width: u32, height: u32, pixels_per_degree: f64) -> Self {
        Self::new(width as f64 / 2.0, height as f64 / 2.0, pixels_per_degree)
    }

    /// Ring radius in pixels for a latitude.
    pub fn radius(&self, latitude: f64) -> f64 {
        (90.0 - latitude) * self.pixels_per_degree
    }

    /// Pixel at the bottom of the ring, where labels go.
    pub fn label_anchor(&self, latitude: f64) -> (f64, f64) {
        (self.center_x, self.center_y + self.radius(latitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pole_has_zero_radius() {
        let projection = PolarProjection::for_image(1000, 800, DEFAULT_PIXELS_PER_DEGREE);
        assert_eq!(projection.radius(90.0), 0.0);
        assert_eq!(projection.center_x, 500.0);
        assert_eq!(projection.center_y, 400.0);
    }

    #[test]
    fn test_radius_scales_with_colatitude() {
        let projection = PolarProjection::new(0.0, 0.0, 10.0);
        assert_eq!(projection.radius(60.0), 300.0);
        assert_eq!(projection.radius(0.0), 900.0);
        assert_eq!(projection.label_anchor(80.0), (0.0, 100.0));
    }
}
