//! Plain-text reports of tool results

use crate::algorithm::executor::{EigenMapReport, PcaRoundTrip, ToolOutput};
use crate::analysis::covariance::CovarianceEstimate;
use crate::analysis::distribution::{DensityCurve, DensitySurface, DistributionSeries};
use crate::analysis::statistics::SummaryStatistics;
use crate::math::eigen::EigenDecomposition2;
use crate::spatial::lattice::LatticeFamily;
use nalgebra::{Matrix2, Point2, Vector2};

/// Render a tool result as human-readable lines
pub fn render_report(output: &ToolOutput) -> String {
    let lines = match output {
        ToolOutput::EigenMap(report) => eigen_map_lines(report),
        ToolOutput::Covariance(estimate) => covariance_lines(estimate),
        ToolOutput::Pca(round_trip) => pca_lines(round_trip),
        ToolOutput::Distribution(DistributionSeries::Curve(curve)) => curve_lines(curve),
        ToolOutput::Distribution(DistributionSeries::Surface(surface)) => surface_lines(surface),
    };
    lines.join("\n")
}

fn eigen_map_lines(report: &EigenMapReport) -> Vec<String> {
    let map = &report.map;
    let mut lines = vec![
        format!("matrix       {}", matrix_text(map.matrix())),
        format!(
            "trace        {:.4}    determinant {:.4}",
            map.trace(),
            map.determinant()
        ),
    ];
    lines.extend(eigen_lines(&report.decomposition));

    if let Some((point, image)) = report.probe {
        lines.push(format!(
            "probe        {} -> {}",
            point_text(&point),
            point_text(&image)
        ));
    }

    let first = report
        .lattice
        .iter()
        .filter(|line| line.family == LatticeFamily::First)
        .count();
    lines.push(format!(
        "lattice      {} lines ({first} along e1 image, {} along e2 image)",
        report.lattice.len(),
        report.lattice.len() - first
    ));
    lines
}

fn eigen_lines(decomposition: &EigenDecomposition2) -> Vec<String> {
    let values = decomposition.eigenvalues;
    let mut lines = if decomposition.complex_eigenvalues {
        vec![format!(
            "eigenvalues  {:.4} ± {:.4}i (complex pair, real parts kept)",
            values.x, decomposition.imaginary
        )]
    } else {
        vec![format!("eigenvalues  {:.4}, {:.4}", values.x, values.y)]
    };

    let scaled = decomposition.scaled_eigenvectors();
    for (index, scaled_vector) in scaled.iter().enumerate() {
        let unit = decomposition.eigenvector(index).unwrap_or_else(Vector2::zeros);
        lines.push(format!(
            "eigenvector  {}: {} scaled {}",
            index + 1,
            vector_text(&unit),
            vector_text(scaled_vector)
        ));
    }
    if decomposition.has_isotropic_eigenspace() {
        lines.push("note         every direction is an eigenvector; none drawn".to_string());
    }
    lines
}

fn covariance_lines(estimate: &CovarianceEstimate) -> Vec<String> {
    let mut lines = vec![
        format!("samples      {}", estimate.sample_count),
        format!("centroid     {}", point_text(&estimate.centroid)),
        format!("covariance   {}", matrix_text(&estimate.covariance)),
    ];
    lines.extend(eigen_lines(&estimate.eigen));
    for (index, axis) in estimate.principal_axes().iter().enumerate() {
        lines.push(format!(
            "axis         {}: {} -> {} (variance {:.4})",
            index + 1,
            point_text(&axis.start),
            point_text(&axis.end),
            axis.variance
        ));
    }
    lines
}

fn pca_lines(round_trip: &PcaRoundTrip) -> Vec<String> {
    let encoding = &round_trip.encoding;
    let (rows, cols) = encoding.projections.dim();
    vec![
        format!("image        {cols}x{rows}"),
        format!(
            "direction    ({:.4}, {:.4}, {:.4})",
            encoding.direction.x, encoding.direction.y, encoding.direction.z
        ),
        format!("eigenvalue   {:.4}", encoding.eigenvalue),
        format!("gray bound   {:.4}", encoding.gray_bound),
        format!("rms error    {:.4}", round_trip.rms_error),
    ]
}

fn curve_lines(curve: &DensityCurve) -> Vec<String> {
    let mut lines = summary_lines(&curve.summary);
    let peak = curve
        .samples
        .iter()
        .max_by(|a, b| a.density.total_cmp(&b.density));
    if let Some(peak) = peak {
        lines.push(format!("peak         {:.4} at x = {:.4}", peak.density, peak.x));
    }
    if let Some(mass) = curve.window_mass {
        lines.push(format!("window mass  {mass:.6}"));
    }
    lines
}

fn surface_lines(surface: &DensitySurface) -> Vec<String> {
    let size = surface.axis.len();
    let mut lines = vec![format!("grid         {size}x{size}")];
    lines.extend(summary_lines(&surface.summary));
    lines.push(format!("peak         {:.6}", surface.peak));
    lines
}

fn summary_lines(summary: &SummaryStatistics) -> Vec<String> {
    vec![
        format!("samples      {}", summary.count),
        format!("mean         {:.6}", summary.mean),
        format!("variance     {:.6}", summary.variance),
        format!("std dev      {:.6}", summary.std_dev),
    ]
}

fn matrix_text(matrix: &Matrix2<f64>) -> String {
    format!(
        "[[{:.4}, {:.4}], [{:.4}, {:.4}]]",
        matrix.m11, matrix.m12, matrix.m21, matrix.m22
    )
}

fn point_text(point: &Point2<f64>) -> String {
    format!("({:.4}, {:.4})", point.x, point.y)
}

fn vector_text(vector: &Vector2<f64>) -> String {
    format!("({:.4}, {:.4})", vector.x, vector.y)
}
