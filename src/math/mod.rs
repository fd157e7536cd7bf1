//! Mathematical primitives for the analyses

/// Closed-form 2x2 and symmetric 3x3 eigen-decomposition
pub mod eigen;
/// 2D linear maps and their lattice images
pub mod linear_map;
/// Probability density formulas
pub mod probability;
