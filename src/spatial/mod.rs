//! Plane geometry shared by the tools
//!
//! This module contains:
//! - The rectangular plotting window
//! - Seeded point cloud generation
//! - Lattice lines clipped to the window

/// Transformed grid lines clipped to a window
pub mod lattice;
/// Seeded point cloud generation
pub mod points;
/// Rectangular plotting window
pub mod viewport;

pub use viewport::Viewport;
