//! Single dispatch point for the four visualization tools
//!
//! Each tool is a pure function of its request. The caller builds a [`Tool`]
//! from whatever parameters it collected and receives a [`ToolOutput`] that
//! holds everything needed to draw the result.

use crate::analysis::covariance::{CovarianceEstimate, estimate_covariance};
use crate::analysis::distribution::{DistributionKind, DistributionSeries, sample_distribution};
use crate::analysis::pca::{PcaCodec, PcaEncoding, reconstruction_error};
use crate::io::error::Result;
use crate::math::eigen::EigenDecomposition2;
use crate::math::linear_map::LinearMap2D;
use crate::spatial::lattice::LatticeLine;
use crate::spatial::points::PointCloud;
use crate::spatial::viewport::Viewport;
use image::RgbImage;
use nalgebra::Point2;

/// Parameters for the eigen map tool
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EigenMapRequest {
    /// Map under study
    pub map: LinearMap2D,
    /// Optional point whose image is reported alongside the eigenvectors
    pub probe: Option<Point2<f64>>,
    /// Window used to clip the transformed lattice
    pub viewport: Viewport,
}

/// Everything needed to draw the eigen map view
#[derive(Debug, Clone, PartialEq)]
pub struct EigenMapReport {
    /// Map that was analyzed
    pub map: LinearMap2D,
    /// Eigenvalues and eigenvectors of the map
    pub decomposition: EigenDecomposition2,
    /// Probe point and its image under the map
    pub probe: Option<(Point2<f64>, Point2<f64>)>,
    /// Transformed grid lines inside the viewport
    pub lattice: Vec<LatticeLine>,
}

/// Encoding, reconstruction and error of one PCA round trip
#[derive(Debug, Clone)]
pub struct PcaRoundTrip {
    /// Projection onto the principal color direction
    pub encoding: PcaEncoding,
    /// Image rebuilt from the projections
    pub reconstruction: RgbImage,
    /// Root-mean-square per-channel error of the reconstruction
    pub rms_error: f64,
}

/// Tool selection together with its input
#[derive(Debug, Clone)]
pub enum Tool {
    /// Eigen-decomposition of a 2D linear map
    EigenMap(EigenMapRequest),
    /// Covariance and principal axes of a point cloud
    Covariance(PointCloud),
    /// Principal color component of an image
    Pca(RgbImage),
    /// Density sweep of a closed-form distribution
    Distribution(DistributionKind),
}

/// Result of running a [`Tool`]
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Eigen map view
    EigenMap(EigenMapReport),
    /// Covariance view
    Covariance(CovarianceEstimate),
    /// PCA view
    Pca(Box<PcaRoundTrip>),
    /// Distribution plot
    Distribution(DistributionSeries),
}

impl Tool {
    /// Short name used in logs and reports
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EigenMap(_) => "eigen map",
            Self::Covariance(_) => "covariance",
            Self::Pca(_) => "pca",
            Self::Distribution(_) => "distribution",
        }
    }
}

/// Run the selected tool
///
/// # Errors
///
/// Propagates the tool's own validation errors:
/// - `EmptyInput` for a covariance request without points
/// - `InvalidImage` for an empty PCA image
/// - `InvalidParameter` for out-of-range distribution parameters
pub fn execute(tool: &Tool) -> Result<ToolOutput> {
    match tool {
        Tool::EigenMap(request) => Ok(ToolOutput::EigenMap(run_eigen_map(request))),
        Tool::Covariance(cloud) => estimate_covariance(cloud.points()).map(ToolOutput::Covariance),
        Tool::Pca(image) => run_pca(image).map(|round_trip| ToolOutput::Pca(Box::new(round_trip))),
        Tool::Distribution(kind) => sample_distribution(kind).map(ToolOutput::Distribution),
    }
}

/// Analyze a linear map: eigen structure, probe image and transformed lattice
pub fn run_eigen_map(request: &EigenMapRequest) -> EigenMapReport {
    let map = request.map;
    EigenMapReport {
        map,
        decomposition: map.eigen_decompose(),
        probe: request.probe.map(|point| (point, map.apply_point(&point))),
        lattice: map.lattice_lines(&request.viewport),
    }
}

/// Encode an image, decode it again and measure the loss
///
/// # Errors
///
/// Returns an error if the image is empty or the eigen-decomposition fails
pub fn run_pca(image: &RgbImage) -> Result<PcaRoundTrip> {
    let encoding = PcaCodec::encode(image)?;
    let reconstruction = PcaCodec::decode(&encoding.projections, &encoding.direction)?;
    let rms_error = reconstruction_error(image, &reconstruction)?;
    Ok(PcaRoundTrip {
        encoding,
        reconstruction,
        rms_error,
    })
}
