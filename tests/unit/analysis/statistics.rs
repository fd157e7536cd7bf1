//! Tests for population summary statistics

#[cfg(test)]
mod tests {
    use eigenscope::AnalysisError;
    use eigenscope::analysis::statistics::SummaryStatistics;

    // Tests mean, population variance and standard deviation of a small sample
    // Verified by dividing by n - 1
    #[test]
    fn test_summary_of_known_values() {
        let summary = SummaryStatistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .expect("non-empty input");

        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < f64::EPSILON);
        assert!((summary.variance - 4.0).abs() < f64::EPSILON);
        assert!((summary.std_dev - 2.0).abs() < f64::EPSILON);
    }

    // Tests a constant sequence has zero spread
    // Verified by adding one to the variance accumulator
    #[test]
    fn test_constant_values() {
        let summary = SummaryStatistics::from_iter_values(std::iter::repeat_n(0.25, 3))
            .expect("non-empty input");

        assert_eq!(summary.count, 3);
        assert!((summary.mean - 0.25).abs() < f64::EPSILON);
        assert!(summary.variance.abs() < f64::EPSILON);
    }

    // Tests empty input is an error rather than NaN statistics
    // Verified by returning zeroed statistics for empty input
    #[test]
    fn test_empty_input() {
        assert!(matches!(
            SummaryStatistics::from_values(&[]),
            Err(AnalysisError::EmptyInput { .. })
        ));
    }
}
