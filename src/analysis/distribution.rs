//! Closed-form density sweeps for plotting
//!
//! Samples are evaluated on a fixed grid over the plotting window, not drawn
//! at random, so every sweep is deterministic.

use crate::analysis::statistics::SummaryStatistics;
use crate::io::configuration::{
    MAX_DISTRIBUTION_SAMPLES, MAX_SURFACE_AXIS_SAMPLES, SWEEP_MAX, SWEEP_MIN,
};
use crate::io::error::{Result, invalid_parameter, require_finite, require_positive};
use crate::math::probability::{
    binomial_pmf, binomial_term, isotropic_bivariate_pdf, normal_cdf, normal_pdf,
};
use ndarray::Array2;
use num_traits::ToPrimitive;

/// How the per-outcome binomial values are weighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinomialWeighting {
    /// `p^i (1-p)^(n-i)`: likelihood of one specific sequence, not normalized
    #[default]
    SequenceLikelihood,
    /// `C(n, i) p^i (1-p)^(n-i)`: the binomial probability mass
    Coefficient,
}

/// Which density to sweep, with its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionKind {
    /// Binomial-term values for `i = 0..=trials`
    Bernoulli {
        /// Success probability in `[0, 1]`
        probability: f64,
        /// Number of trials `n`
        trials: usize,
        /// Whether the binomial coefficient is applied
        weighting: BinomialWeighting,
    },
    /// One-dimensional normal density over `[-10, 10]`
    Normal {
        /// Mean μ
        mean: f64,
        /// Standard deviation σ
        std_dev: f64,
        /// Sweep resolution
        step: f64,
    },
    /// Centered isotropic bivariate normal over `[-10, 10]²`
    Normal2D {
        /// Standard deviation σ on both axes
        std_dev: f64,
        /// Grid resolution
        step: f64,
    },
}

/// One `(input, density)` pair of a plotted curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySample {
    /// Input value (outcome index for the binomial sweep)
    pub x: f64,
    /// Evaluated density
    pub density: f64,
}

/// Curve produced by a one-dimensional sweep
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    /// Samples in increasing `x`
    pub samples: Vec<DensitySample>,
    /// Statistics over the sample densities
    pub summary: SummaryStatistics,
    /// Probability mass of the distribution inside the sweep window, when defined
    pub window_mass: Option<f64>,
}

/// Field produced by a two-dimensional sweep
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySurface {
    /// Sample coordinates shared by both axes
    pub axis: Vec<f64>,
    /// Densities min-max normalized into `[0, 1]`, indexed by (y, x)
    pub field: Array2<f64>,
    /// Statistics over the raw densities before normalization
    pub summary: SummaryStatistics,
    /// Largest raw density in the field
    pub peak: f64,
}

/// Output of a density sweep
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionSeries {
    /// One-dimensional curve
    Curve(DensityCurve),
    /// Two-dimensional normalized field
    Surface(DensitySurface),
}

impl DistributionSeries {
    /// Summary statistics of the sampled values
    pub const fn summary(&self) -> &SummaryStatistics {
        match self {
            Self::Curve(curve) => &curve.summary,
            Self::Surface(surface) => &surface.summary,
        }
    }
}

/// Evaluate the configured density over its sweep
///
/// # Errors
///
/// Returns `InvalidParameter` if:
/// - `probability` is outside `[0, 1]` or not finite
/// - `trials` would produce more than the sample limit
/// - `std_dev` or `step` is not a positive finite number, or `mean` is not finite
/// - the 2D `std_dev` squares below the smallest normal `f64`
/// - `step` is so small that the sweep would exceed the sample limit
pub fn sample_distribution(kind: &DistributionKind) -> Result<DistributionSeries> {
    match *kind {
        DistributionKind::Bernoulli {
            probability,
            trials,
            weighting,
        } => sample_bernoulli(probability, trials, weighting).map(DistributionSeries::Curve),
        DistributionKind::Normal {
            mean,
            std_dev,
            step,
        } => sample_normal(mean, std_dev, step).map(DistributionSeries::Curve),
        DistributionKind::Normal2D { std_dev, step } => {
            sample_normal_2d(std_dev, step).map(DistributionSeries::Surface)
        }
    }
}

fn sample_bernoulli(
    probability: f64,
    trials: usize,
    weighting: BinomialWeighting,
) -> Result<DensityCurve> {
    require_finite("probability", probability)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(invalid_parameter(
            "probability",
            &probability,
            &"must lie in [0, 1]",
        ));
    }
    if trials >= MAX_DISTRIBUTION_SAMPLES {
        return Err(invalid_parameter(
            "trials",
            &trials,
            &format!("must be below {MAX_DISTRIBUTION_SAMPLES}"),
        ));
    }

    let samples: Vec<DensitySample> = (0..=trials)
        .map(|successes| DensitySample {
            x: successes as f64,
            density: match weighting {
                BinomialWeighting::SequenceLikelihood => {
                    binomial_term(probability, trials, successes)
                }
                BinomialWeighting::Coefficient => binomial_pmf(probability, trials, successes),
            },
        })
        .collect();

    let summary = SummaryStatistics::from_iter_values(samples.iter().map(|s| s.density))?;
    Ok(DensityCurve {
        samples,
        summary,
        window_mass: None,
    })
}

fn sample_normal(mean: f64, std_dev: f64, step: f64) -> Result<DensityCurve> {
    require_finite("mean", mean)?;
    require_positive("std_dev", std_dev)?;
    let axis = sweep_axis(step, MAX_DISTRIBUTION_SAMPLES)?;

    let samples: Vec<DensitySample> = axis
        .iter()
        .map(|&x| DensitySample {
            x,
            density: normal_pdf(x, mean, std_dev),
        })
        .collect();

    let summary = SummaryStatistics::from_iter_values(samples.iter().map(|s| s.density))?;
    let window_mass = normal_cdf(SWEEP_MAX, mean, std_dev) - normal_cdf(SWEEP_MIN, mean, std_dev);
    Ok(DensityCurve {
        samples,
        summary,
        window_mass: Some(window_mass),
    })
}

fn sample_normal_2d(std_dev: f64, step: f64) -> Result<DensitySurface> {
    require_positive("std_dev", std_dev)?;
    // The peak 1/(2πσ²) overflows once σ² leaves the normal range
    if !(std_dev * std_dev).is_normal() {
        return Err(invalid_parameter(
            "std_dev",
            &std_dev,
            &"is too small for its square to be represented",
        ));
    }
    let axis = sweep_axis(step, MAX_SURFACE_AXIS_SAMPLES)?;
    let size = axis.len();

    let raw = Array2::from_shape_fn((size, size), |(row, col)| {
        let x = axis.get(col).copied().unwrap_or(0.0);
        let y = axis.get(row).copied().unwrap_or(0.0);
        isotropic_bivariate_pdf(x, y, std_dev)
    });

    let summary = SummaryStatistics::from_iter_values(raw.iter().copied())?;
    let (low, peak) = raw
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = peak - low;
    let field = if range > 0.0 {
        raw.mapv(|v| (v - low) / range)
    } else {
        Array2::zeros((size, size))
    };

    Ok(DensitySurface {
        axis,
        field,
        summary,
        peak,
    })
}

/// Sample positions `SWEEP_MIN + i·step` up to and including `SWEEP_MAX`
///
/// # Errors
///
/// Returns `InvalidParameter` if `step` is not a positive finite number or the
/// sweep would hold more than `limit` samples
pub fn sweep_axis(step: f64, limit: usize) -> Result<Vec<f64>> {
    let step = require_positive("step", step)?;

    // Small slack so steps that divide the window exactly keep the endpoint
    let intervals = ((SWEEP_MAX - SWEEP_MIN) / step + 1e-9).floor();
    let count = intervals
        .to_usize()
        .and_then(|n| n.checked_add(1))
        .filter(|&n| n <= limit)
        .ok_or_else(|| {
            invalid_parameter(
                "step",
                &step,
                &format!("sweep would exceed {limit} samples"),
            )
        })?;

    Ok((0..count)
        .map(|i| (i as f64).mul_add(step, SWEEP_MIN))
        .collect())
}
