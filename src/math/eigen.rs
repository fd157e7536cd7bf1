//! Eigensolvers for 2x2 maps and 3x3 scatter matrices
//!
//! The 2x2 solver is closed form and keeps full precision for plotting. The
//! 3x3 solver is iterative and only valid for symmetric input.

use crate::io::configuration::{DISCRIMINANT_ROUNDING, EIGEN_TOLERANCE};
use crate::io::error::{Result, computation_error};
use nalgebra::{Matrix2, Matrix3, SymmetricEigen, Vector2, Vector3};

const SYMMETRIC_EIGEN_MAX_ITERATIONS: usize = 1000;

/// Eigen-decomposition of a real 2x2 matrix
///
/// Only real parts are stored. When the characteristic polynomial has complex
/// roots both eigenvalues share the real part `tr/2`, `complex_eigenvalues` is
/// set and `imaginary` holds the magnitude of the imaginary part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenDecomposition2 {
    /// Real parts of the eigenvalues, ordered so that `x >= y`
    pub eigenvalues: Vector2<f64>,
    /// Eigenvectors as columns, unit length or zero
    pub eigenvectors: Matrix2<f64>,
    /// Magnitude of the imaginary part (zero for real eigenvalues)
    pub imaginary: f64,
    /// Whether the eigenvalues form a complex conjugate pair
    pub complex_eigenvalues: bool,
}

impl EigenDecomposition2 {
    /// Eigenvector column for eigenvalue `index` (0 or 1)
    pub fn eigenvector(&self, index: usize) -> Option<Vector2<f64>> {
        (index < 2).then(|| self.eigenvectors.column(index).into_owned())
    }

    /// Eigenvectors pre-scaled by their eigenvalues, as drawn on the canvas
    pub fn scaled_eigenvectors(&self) -> [Vector2<f64>; 2] {
        [
            self.eigenvectors.column(0) * self.eigenvalues.x,
            self.eigenvectors.column(1) * self.eigenvalues.y,
        ]
    }

    /// True when an eigenvector column is zero because its eigenspace is the whole plane
    pub fn has_isotropic_eigenspace(&self) -> bool {
        self.eigenvectors
            .column_iter()
            .any(|column| column.norm_squared() == 0.0)
    }
}

/// Closed-form eigen-decomposition of a 2x2 matrix
///
/// Eigenvalues are the roots of `λ² − tr(M)λ + det(M) = 0`. Each eigenvector
/// solves `(M − λI)v = 0` using whichever matrix row gives the longer
/// candidate. Scalar matrices (including zero) have every vector as an
/// eigenvector; their columns are returned as zero vectors.
pub fn eigen_decompose_2x2(matrix: &Matrix2<f64>) -> EigenDecomposition2 {
    let (m00, m01, m10, m11) = (matrix.m11, matrix.m12, matrix.m21, matrix.m22);
    let scale = matrix.amax();

    let half_trace = 0.5 * (m00 + m11);
    let determinant = m00.mul_add(m11, -(m01 * m10));
    // (tr/2)² − det, a quarter of the usual discriminant
    let discriminant = half_trace.mul_add(half_trace, -determinant);

    // Only rounding error may push a real repeated root below zero
    if discriminant < -DISCRIMINANT_ROUNDING * scale * scale {
        let imaginary = (-discriminant).sqrt();
        let column = complex_eigenvector_real_part(m00, m01, m10, m11, half_trace, imaginary);
        return EigenDecomposition2 {
            eigenvalues: Vector2::new(half_trace, half_trace),
            eigenvectors: Matrix2::from_columns(&[column, column]),
            imaginary,
            complex_eigenvalues: true,
        };
    }

    let root = discriminant.max(0.0).sqrt();
    // Take the larger-magnitude root directly and recover the other from the
    // determinant to avoid cancellation
    let (larger, smaller) = if half_trace >= 0.0 {
        let first = half_trace + root;
        let second = if first.abs() > f64::MIN_POSITIVE {
            determinant / first
        } else {
            half_trace - root
        };
        (first, second)
    } else {
        let second = half_trace - root;
        let first = if second.abs() > f64::MIN_POSITIVE {
            determinant / second
        } else {
            half_trace + root
        };
        (first, second)
    };
    let (larger, smaller) = (larger.max(smaller), larger.min(smaller));

    let tolerance = EIGEN_TOLERANCE * scale.max(larger.abs()).max(smaller.abs());
    let first_vector = real_eigenvector(m00, m01, m10, m11, larger, tolerance);
    let second_vector = real_eigenvector(m00, m01, m10, m11, smaller, tolerance);

    EigenDecomposition2 {
        eigenvalues: Vector2::new(larger, smaller),
        eigenvectors: Matrix2::from_columns(&[first_vector, second_vector]),
        imaginary: 0.0,
        complex_eigenvalues: false,
    }
}

fn real_eigenvector(
    m00: f64,
    m01: f64,
    m10: f64,
    m11: f64,
    eigenvalue: f64,
    tolerance: f64,
) -> Vector2<f64> {
    let from_first_row = Vector2::new(m01, eigenvalue - m00);
    let from_second_row = Vector2::new(eigenvalue - m11, m10);
    let candidate = if from_first_row.norm_squared() >= from_second_row.norm_squared() {
        from_first_row
    } else {
        from_second_row
    };

    let norm = candidate.norm();
    if norm <= tolerance {
        Vector2::zeros()
    } else {
        candidate / norm
    }
}

// Both conjugate eigenvectors share this real part once normalized to unit length
fn complex_eigenvector_real_part(
    m00: f64,
    m01: f64,
    m10: f64,
    m11: f64,
    real: f64,
    imaginary: f64,
) -> Vector2<f64> {
    let first_row = Vector2::new(m01, real - m00);
    let second_row = Vector2::new(real - m11, m10);
    let candidate = if first_row.norm_squared() >= second_row.norm_squared() {
        first_row
    } else {
        second_row
    };

    let complex_norm = imaginary.mul_add(imaginary, candidate.norm_squared()).sqrt();
    if complex_norm > 0.0 {
        candidate / complex_norm
    } else {
        Vector2::zeros()
    }
}

/// Eigen-decomposition of a symmetric 3x3 matrix
///
/// # Errors
///
/// Returns a computation error if the iterative solver does not converge
pub fn symmetric_eigen_3x3(matrix: &Matrix3<f64>) -> Result<SymmetricEigen<f64, nalgebra::U3>> {
    SymmetricEigen::try_new(*matrix, f64::EPSILON, SYMMETRIC_EIGEN_MAX_ITERATIONS).ok_or_else(
        || {
            computation_error(
                "symmetric eigen-decomposition",
                &"solver did not converge",
            )
        },
    )
}

/// Unit eigenvector of the largest eigenvalue of a symmetric 3x3 matrix
///
/// The sign is fixed so that the components sum to a non-negative value,
/// which keeps projections of non-negative colors non-negative.
///
/// # Errors
///
/// Returns a computation error if the solver does not converge or the
/// dominant eigenvector cannot be normalized
pub fn dominant_eigenvector_3x3(matrix: &Matrix3<f64>) -> Result<(f64, Vector3<f64>)> {
    let decomposition = symmetric_eigen_3x3(matrix)?;
    let index = decomposition.eigenvalues.imax();
    let eigenvalue = decomposition
        .eigenvalues
        .get(index)
        .copied()
        .ok_or_else(|| computation_error("dominant eigenvector", &"eigenvalue index out of range"))?;

    let direction = decomposition
        .eigenvectors
        .column(index)
        .into_owned()
        .try_normalize(f64::MIN_POSITIVE)
        .ok_or_else(|| computation_error("dominant eigenvector", &"eigenvector has zero length"))?;

    if direction.sum() < 0.0 {
        Ok((eigenvalue, -direction))
    } else {
        Ok((eigenvalue, direction))
    }
}
