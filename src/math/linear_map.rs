//! Linear maps of the plane and their eigen structure

use crate::io::configuration::{DEFAULT_M00, DEFAULT_M01, DEFAULT_M10, DEFAULT_M11};
use crate::math::eigen::{EigenDecomposition2, eigen_decompose_2x2};
use crate::spatial::lattice::{LatticeLine, lattice_lines};
use crate::spatial::viewport::Viewport;
use nalgebra::{Matrix2, Point2, Vector2};
use tracing::{debug, warn};

/// A 2x2 matrix acting on points by `y = M x`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMap2D {
    matrix: Matrix2<f64>,
}

impl Default for LinearMap2D {
    fn default() -> Self {
        Self::from_entries(DEFAULT_M00, DEFAULT_M10, DEFAULT_M01, DEFAULT_M11)
    }
}

impl LinearMap2D {
    /// Wrap an existing matrix
    pub const fn new(matrix: Matrix2<f64>) -> Self {
        Self { matrix }
    }

    /// Build from entries named by (row, column)
    pub fn from_entries(m00: f64, m10: f64, m01: f64, m11: f64) -> Self {
        Self {
            matrix: Matrix2::new(m00, m01, m10, m11),
        }
    }

    /// The underlying matrix
    pub const fn matrix(&self) -> &Matrix2<f64> {
        &self.matrix
    }

    /// Trace of the matrix
    pub fn trace(&self) -> f64 {
        self.matrix.trace()
    }

    /// Determinant of the matrix
    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    /// Map a single point
    pub fn apply_point(&self, point: &Point2<f64>) -> Point2<f64> {
        Point2::from(self.matrix * point.coords)
    }

    /// Map every point of a set, preserving order
    pub fn apply(&self, points: &[Point2<f64>]) -> Vec<Point2<f64>> {
        points.iter().map(|point| self.apply_point(point)).collect()
    }

    /// Images of the standard basis vectors, i.e. the matrix columns
    pub fn basis_images(&self) -> [Vector2<f64>; 2] {
        [
            self.matrix.column(0).into_owned(),
            self.matrix.column(1).into_owned(),
        ]
    }

    /// Closed-form eigen-decomposition
    ///
    /// Complex eigenvalues are reported through the result flag rather than
    /// dropped; the caller decides how to draw them.
    pub fn eigen_decompose(&self) -> EigenDecomposition2 {
        let decomposition = eigen_decompose_2x2(&self.matrix);
        if decomposition.complex_eigenvalues {
            warn!(
                real = decomposition.eigenvalues.x,
                imaginary = decomposition.imaginary,
                "matrix has complex eigenvalues, keeping real parts only"
            );
        }
        debug!(
            eigenvalues = ?decomposition.eigenvalues,
            eigenvectors = ?decomposition.eigenvectors,
            "eigen-decomposition"
        );
        decomposition
    }

    /// Images of the integer grid lines, clipped to the viewport
    pub fn lattice_lines(&self, viewport: &Viewport) -> Vec<LatticeLine> {
        let [first, second] = self.basis_images();
        lattice_lines(first, second, viewport)
    }
}
