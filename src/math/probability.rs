use std::f64::consts::{PI, SQRT_2};

/// Error function approximation using Abramowitz and Stegun method
///
/// Accurate to about 1e-7, which is plenty for reporting how much normal
/// mass a plotting window covers.
pub fn erf(x: f64) -> f64 {
    let a1 = 0.254_829_592_f64;
    let a2 = -0.284_496_736_f64;
    let a3 = 1.421_413_741_f64;
    let a4 = -1.453_152_027_f64;
    let a5 = 1.061_405_429_f64;
    let p = 0.327_591_1_f64;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / p.mul_add(x, 1.0);
    let y = (((((a5.mul_add(t, a4)).mul_add(t, a3)).mul_add(t, a2)).mul_add(t, a1)) * t)
        .mul_add(-(-x * x).exp(), 1.0);

    sign * y
}

/// Density of the normal distribution with the given mean and standard deviation
///
/// Callers validate `std_dev > 0`.
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Cumulative distribution function of the normal distribution
pub fn normal_cdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    0.5 * (1.0 + erf((x - mean) / (SQRT_2 * std_dev)))
}

/// Density of a centered bivariate normal with covariance `σ²I`
///
/// Works in z-scores and divides by σ twice so σ² is never formed.
pub fn isotropic_bivariate_pdf(x: f64, y: f64, std_dev: f64) -> f64 {
    let (zx, zy) = (x / std_dev, y / std_dev);
    (-0.5 * zx.mul_add(zx, zy * zy)).exp() / (2.0 * PI) / std_dev / std_dev
}

/// Likelihood of one particular sequence with `successes` out of `trials`
///
/// This is `p^k (1-p)^(n-k)` without the binomial coefficient, so the values
/// over `k` do not sum to one.
pub fn binomial_term(probability: f64, trials: usize, successes: usize) -> f64 {
    let failures = trials.saturating_sub(successes);
    probability.powi(exponent(successes)) * (1.0 - probability).powi(exponent(failures))
}

/// Number of ways to choose `k` items out of `n`, as a float
pub fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Probability mass of the binomial distribution
pub fn binomial_pmf(probability: f64, trials: usize, successes: usize) -> f64 {
    binomial_coefficient(trials, successes) * binomial_term(probability, trials, successes)
}

fn exponent(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
