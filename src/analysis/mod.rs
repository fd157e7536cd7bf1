//! Analyses built on the math primitives

/// Sample covariance and principal axes of 2D points
pub mod covariance;
/// Density sweeps for plotting
pub mod distribution;
/// Principal color component compression of RGB images
pub mod pca;
/// Population summary statistics
pub mod statistics;
