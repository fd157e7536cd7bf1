//! Seeded point cloud generation for covariance experiments

use crate::io::error::{Result, invalid_parameter, require_finite};
use crate::spatial::viewport::Viewport;
use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Spatial layout of a batch of generated points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointPattern {
    /// Uniformly distributed over the viewport
    Uniform,
    /// Scattered along a segment with perpendicular jitter
    Segment {
        /// First endpoint
        start: Point2<f64>,
        /// Second endpoint
        end: Point2<f64>,
        /// Maximum perpendicular distance from the segment
        radius: f64,
    },
}

/// One generation request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGeneration {
    /// Number of points to add
    pub count: usize,
    /// Keep existing points instead of clearing the cloud first
    pub append: bool,
    /// Where the points are placed
    pub pattern: PointPattern,
}

impl PointGeneration {
    fn validate(&self) -> Result<()> {
        if let PointPattern::Segment { start, end, radius } = self.pattern {
            for value in [start.x, start.y, end.x, end.y] {
                require_finite("segment endpoint", value)?;
            }
            require_finite("radius", radius)?;
            if radius < 0.0 {
                return Err(invalid_parameter(
                    "radius",
                    &radius,
                    &"must not be negative",
                ));
            }
        }
        Ok(())
    }
}

/// Seeded random source for reproducible point clouds
pub struct PointSampler {
    rng: StdRng,
}

impl PointSampler {
    /// Create a deterministic sampler
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform point inside the viewport
    pub fn uniform(&mut self, viewport: &Viewport) -> Point2<f64> {
        let x = self.rng.random::<f64>().mul_add(viewport.width(), viewport.min.x);
        let y = self.rng.random::<f64>().mul_add(viewport.height(), viewport.min.y);
        Point2::new(x, y)
    }

    /// Point at a uniform position along the segment, pushed sideways by up to `radius`
    pub fn along_segment(
        &mut self,
        start: &Point2<f64>,
        end: &Point2<f64>,
        radius: f64,
    ) -> Point2<f64> {
        let direction = *end - *start;
        let along = *start + direction * self.rng.random::<f64>();

        // Degenerate segments have no normal to jitter along
        let Some(unit) = direction.try_normalize(f64::MIN_POSITIVE) else {
            return *start;
        };
        let normal = Vector2::new(-unit.y, unit.x);
        let offset = self.rng.random::<f64>().mul_add(2.0, -1.0) * radius;
        along + normal * offset
    }
}

/// Ordered set of points under analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point2<f64>>,
}

impl PointCloud {
    /// Create an empty cloud
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Wrap existing points
    pub const fn from_points(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Points in insertion order
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cloud holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Remove every point
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Consume the cloud and return its points
    pub fn into_points(self) -> Vec<Point2<f64>> {
        self.points
    }

    /// Add a batch of random points according to `generation`
    ///
    /// # Errors
    ///
    /// Returns an error if the segment endpoints or radius are not finite,
    /// or the radius is negative. The cloud is left untouched in that case.
    pub fn generate(
        &mut self,
        generation: &PointGeneration,
        sampler: &mut PointSampler,
        viewport: &Viewport,
    ) -> Result<()> {
        generation.validate()?;

        if !generation.append {
            self.points.clear();
        }
        self.points.reserve(generation.count);

        for _ in 0..generation.count {
            let point = match generation.pattern {
                PointPattern::Uniform => sampler.uniform(viewport),
                PointPattern::Segment { start, end, radius } => {
                    sampler.along_segment(&start, &end, radius)
                }
            };
            self.points.push(point);
        }

        Ok(())
    }
}

impl From<Vec<Point2<f64>>> for PointCloud {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Self::from_points(points)
    }
}
