//! Population summary statistics over sampled values

use crate::io::error::{AnalysisError, Result};

/// Mean and spread of a finite sequence of values
///
/// Variance is the biased (population) estimate `(1/n) Σ (v − mean)²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Number of values summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Square root of the variance
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Summarize a slice of values
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when `values` is empty
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::from_iter_values(values.iter().copied())
    }

    /// Summarize any re-iterable sequence of values without collecting it
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` when the sequence is empty
    pub fn from_iter_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: Clone,
    {
        let iter = values.into_iter();

        let (count, sum) = iter
            .clone()
            .fold((0_usize, 0.0_f64), |(n, total), value| (n + 1, total + value));
        if count == 0 {
            return Err(AnalysisError::EmptyInput {
                operation: "summary statistics",
            });
        }

        let n = count as f64;
        let mean = sum / n;
        let variance = iter
            .map(|value| {
                let deviation = value - mean;
                deviation * deviation
            })
            .sum::<f64>()
            / n;

        Ok(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
