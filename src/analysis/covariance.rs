//! Sample covariance of a planar point cloud and its principal axes

use crate::io::error::{AnalysisError, Result};
use crate::math::eigen::{EigenDecomposition2, eigen_decompose_2x2};
use nalgebra::{Matrix2, Point2};
use tracing::debug;

/// Centroid, covariance and principal directions of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovarianceEstimate {
    /// Number of points the estimate was computed from
    pub sample_count: usize,
    /// Mean of the points
    pub centroid: Point2<f64>,
    /// Symmetric covariance `(1/n) Σ (p − c)(p − c)ᵀ`
    pub covariance: Matrix2<f64>,
    /// Eigen-decomposition of the covariance
    pub eigen: EigenDecomposition2,
}

/// Segment from the centroid along one principal direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxis {
    /// Variance along the axis (the eigenvalue)
    pub variance: f64,
    /// Start point (the centroid)
    pub start: Point2<f64>,
    /// Centroid displaced by the eigenvector scaled by its eigenvalue
    pub end: Point2<f64>,
}

impl CovarianceEstimate {
    /// Both principal axes, major first
    pub fn principal_axes(&self) -> [PrincipalAxis; 2] {
        let [major, minor] = self.eigen.scaled_eigenvectors();
        [
            PrincipalAxis {
                variance: self.eigen.eigenvalues.x,
                start: self.centroid,
                end: self.centroid + major,
            },
            PrincipalAxis {
                variance: self.eigen.eigenvalues.y,
                start: self.centroid,
                end: self.centroid + minor,
            },
        ]
    }
}

/// Estimate the covariance of a point set
///
/// The result depends only on the multiset of points, not their order, and is
/// invariant under translation of the whole set.
///
/// # Errors
///
/// Returns `EmptyInput` when `points` is empty
pub fn estimate_covariance(points: &[Point2<f64>]) -> Result<CovarianceEstimate> {
    if points.is_empty() {
        return Err(AnalysisError::EmptyInput {
            operation: "covariance estimation",
        });
    }

    let normalizer = 1.0 / points.len() as f64;
    let centroid = Point2::from(
        points
            .iter()
            .fold(nalgebra::Vector2::zeros(), |sum, point| sum + point.coords)
            * normalizer,
    );

    let mut covariance = Matrix2::zeros();
    for point in points {
        let centered = *point - centroid;
        covariance += centered * (centered * normalizer).transpose();
    }

    debug!(centroid = ?centroid, covariance = ?covariance, "covariance estimate");

    Ok(CovarianceEstimate {
        sample_count: points.len(),
        centroid,
        covariance,
        eigen: eigen_decompose_2x2(&covariance),
    })
}
