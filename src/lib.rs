//! Numerical core of a linear algebra and probability visualizer
//!
//! The crate computes what the drawing layer shows: eigenvectors and the
//! transformed lattice of a 2D linear map, covariance axes of a point cloud,
//! the principal color axis of an image, and closed-form density sweeps.
//! Every tool is a pure function reached through [`algorithm::executor::execute`].

#![forbid(unsafe_code)]

/// Tool selection and dispatch
pub mod algorithm;
/// Covariance, PCA, density sweeps and summary statistics
pub mod analysis;
/// Command-line front end, image I/O, reports and error handling
pub mod io;
/// Eigensolvers, linear maps and density formulas
pub mod math;
/// Viewport, point clouds and lattice lines
pub mod spatial;

pub use io::error::{AnalysisError, Result};
