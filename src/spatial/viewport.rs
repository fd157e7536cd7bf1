//! Axis-aligned plotting window in model coordinates

use crate::io::configuration::VIEWPORT_HALF_EXTENT;
use crate::io::error::{Result, invalid_parameter, require_finite};
use nalgebra::Point2;

/// Rectangle that bounds generated points and clipped lattice lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Lower-left corner
    pub min: Point2<f64>,
    /// Upper-right corner
    pub max: Point2<f64>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::centered(VIEWPORT_HALF_EXTENT)
    }
}

impl Viewport {
    /// Build a viewport from two corners
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or the rectangle is empty
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Result<Self> {
        for value in [min.x, min.y, max.x, max.y] {
            require_finite("viewport", value)?;
        }
        if min.x >= max.x || min.y >= max.y {
            return Err(invalid_parameter(
                "viewport",
                &format!("[{}, {}] x [{}, {}]", min.x, max.x, min.y, max.y),
                &"minimum corner must lie strictly below and left of the maximum corner",
            ));
        }
        Ok(Self { min, max })
    }

    /// Square viewport `[-half_extent, half_extent]²`
    pub fn centered(half_extent: f64) -> Self {
        Self {
            min: Point2::new(-half_extent, -half_extent),
            max: Point2::new(half_extent, half_extent),
        }
    }

    /// Horizontal size
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical size
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Check if a point lies inside or on the border
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
