//! Numerical constants and runtime configuration defaults

// Start-up matrix of the visualizer, entries named (row, column)
/// Default entry at row 0, column 0
pub const DEFAULT_M00: f64 = 2.0;
/// Default entry at row 1, column 0
pub const DEFAULT_M10: f64 = 2.0;
/// Default entry at row 0, column 1
pub const DEFAULT_M01: f64 = 3.0;
/// Default entry at row 1, column 1
pub const DEFAULT_M11: f64 = 1.0;

/// Half width of the square plotting window centered on the origin
pub const VIEWPORT_HALF_EXTENT: f64 = 10.0;

/// Relative tolerance used to detect vanishing eigenvector candidates
pub const EIGEN_TOLERANCE: f64 = 1e-12;

/// Rounding slack, relative to the squared matrix scale, below which a
/// negative discriminant is treated as a repeated real root
pub const DISCRIMINANT_ROUNDING: f64 = 4.0 * f64::EPSILON;

// Prevents degenerate lattices from looping when columns barely span the plane
/// Maximum number of lattice lines per family
pub const MAX_LATTICE_LINES: usize = 512;

// Point cloud generation
/// Fixed seed for reproducible point clouds
pub const DEFAULT_SEED: u64 = 42;
/// Default number of generated points
pub const DEFAULT_POINT_COUNT: usize = 100;
/// Default perpendicular jitter for points sampled along a segment
pub const DEFAULT_SEGMENT_RADIUS: f64 = 0.2;

// Distribution sweeps
/// Default success probability for the binomial-term sweep
pub const DEFAULT_PROBABILITY: f64 = 0.5;
/// Default number of trials for the binomial-term sweep
pub const DEFAULT_TRIALS: usize = 10;
/// Default mean of the normal density
pub const DEFAULT_MEAN: f64 = 0.0;
/// Default standard deviation of the normal densities
pub const DEFAULT_STD_DEV: f64 = 1.0;
/// Default sweep resolution
pub const DEFAULT_STEP: f64 = 0.1;
/// Lower end of every density sweep
pub const SWEEP_MIN: f64 = -VIEWPORT_HALF_EXTENT;
/// Upper end of every density sweep
pub const SWEEP_MAX: f64 = VIEWPORT_HALF_EXTENT;

// Safety limit to prevent excessive memory allocation
/// Maximum number of samples along a one-dimensional sweep
pub const MAX_DISTRIBUTION_SAMPLES: usize = 20_001;
/// Maximum number of samples along each axis of a two-dimensional sweep
pub const MAX_SURFACE_AXIS_SAMPLES: usize = 2_001;

// Image processing
/// Largest channel value of an 8-bit image
pub const CHANNEL_MAX: f64 = 255.0;
/// Suffix for the grayscale projection written by the PCA tool
pub const ENCODED_SUFFIX: &str = "_encoded";
/// Suffix for the reconstructed image written by the PCA tool
pub const DECODED_SUFFIX: &str = "_decoded";

/// Spinner refresh interval in milliseconds
pub const SPINNER_TICK_MS: u64 = 100;
