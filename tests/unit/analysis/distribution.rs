//! Tests for closed-form density sweeps

#[cfg(test)]
mod tests {
    use eigenscope::AnalysisError;
    use eigenscope::analysis::distribution::{
        BinomialWeighting, DistributionKind, DistributionSeries, sample_distribution, sweep_axis,
    };
    use eigenscope::io::configuration::MAX_DISTRIBUTION_SAMPLES;

    fn curve(kind: &DistributionKind) -> Vec<(f64, f64)> {
        match sample_distribution(kind).expect("valid parameters") {
            DistributionSeries::Curve(curve) => curve
                .samples
                .iter()
                .map(|sample| (sample.x, sample.density))
                .collect(),
            DistributionSeries::Surface(_) => panic!("expected a curve"),
        }
    }

    // Tests p = 0.5, n = 2 gives three sequence likelihoods of 0.25 with mean 0.25
    // Verified by applying the binomial coefficient by default
    #[test]
    fn test_bernoulli_fair_coin() {
        let kind = DistributionKind::Bernoulli {
            probability: 0.5,
            trials: 2,
            weighting: BinomialWeighting::default(),
        };
        let series = sample_distribution(&kind).expect("valid parameters");

        let values = curve(&kind);
        assert_eq!(values.len(), 3);
        for (index, (x, density)) in values.iter().enumerate() {
            assert!((x - index as f64).abs() < f64::EPSILON);
            assert!((density - 0.25).abs() < f64::EPSILON);
        }
        assert_eq!(series.summary().count, 3);
        assert!((series.summary().mean - 0.25).abs() < f64::EPSILON);
        assert!(series.summary().variance.abs() < f64::EPSILON);
    }

    // Tests the coefficient weighting yields the binomial pmf
    // Verified by omitting the coefficient in the pmf
    #[test]
    fn test_bernoulli_with_coefficient() {
        let values = curve(&DistributionKind::Bernoulli {
            probability: 0.5,
            trials: 2,
            weighting: BinomialWeighting::Coefficient,
        });

        let densities: Vec<f64> = values.iter().map(|(_, density)| *density).collect();
        assert!((densities[0] - 0.25).abs() < f64::EPSILON);
        assert!((densities[1] - 0.5).abs() < f64::EPSILON);
        assert!((densities[2] - 0.25).abs() < f64::EPSILON);
    }

    // Tests probabilities outside [0, 1] are rejected
    // Verified by clamping the probability
    #[test]
    fn test_bernoulli_invalid_probability() {
        for probability in [-0.1, 1.5, f64::NAN] {
            let result = sample_distribution(&DistributionKind::Bernoulli {
                probability,
                trials: 4,
                weighting: BinomialWeighting::default(),
            });
            assert!(matches!(
                result,
                Err(AnalysisError::InvalidParameter {
                    parameter: "probability",
                    ..
                })
            ));
        }

        let too_many = sample_distribution(&DistributionKind::Bernoulli {
            probability: 0.5,
            trials: MAX_DISTRIBUTION_SAMPLES,
            weighting: BinomialWeighting::default(),
        });
        assert!(too_many.is_err());
    }

    // Tests the standard normal with step 1 has 21 samples and 1/√(2π) at x = 0
    // Verified by starting the sweep at zero
    #[test]
    fn test_normal_standard_unit_step() {
        let values = curve(&DistributionKind::Normal {
            mean: 0.0,
            std_dev: 1.0,
            step: 1.0,
        });

        assert_eq!(values.len(), 21);
        let (x, density) = values[10];
        assert!(x.abs() < f64::EPSILON);
        assert!((density - 0.398_942_280_4).abs() < 1e-9);
        assert!((values[0].0 + 10.0).abs() < f64::EPSILON);
        assert!((values[20].0 - 10.0).abs() < f64::EPSILON);
    }

    // Tests the window mass reports how much probability the sweep covers
    // Verified by integrating over [0, 10] only
    #[test]
    fn test_normal_window_mass() {
        let series = sample_distribution(&DistributionKind::Normal {
            mean: 9.0,
            std_dev: 1.0,
            step: 0.5,
        })
        .expect("valid parameters");

        let DistributionSeries::Curve(curve) = series else {
            panic!("expected a curve");
        };
        let mass = curve.window_mass.expect("normal sweeps report window mass");
        assert!((mass - 0.841_344_746).abs() < 1e-6);
    }

    // Tests non-positive σ and step are rejected
    // Verified by taking the absolute value of σ
    #[test]
    fn test_normal_invalid_parameters() {
        for (std_dev, step) in [(0.0, 0.1), (-1.0, 0.1), (1.0, 0.0), (1.0, -0.5), (1.0, 1e-9)] {
            let result = sample_distribution(&DistributionKind::Normal {
                mean: 0.0,
                std_dev,
                step,
            });
            assert!(result.is_err(), "σ = {std_dev}, step = {step} should fail");
        }
        assert!(
            sample_distribution(&DistributionKind::Normal {
                mean: f64::INFINITY,
                std_dev: 1.0,
                step: 0.1,
            })
            .is_err()
        );
    }

    // Tests the 2D field is normalized with its maximum at the center
    // Verified by skipping min-max normalization
    #[test]
    fn test_normal_2d_surface() {
        let series = sample_distribution(&DistributionKind::Normal2D {
            std_dev: 2.0,
            step: 1.0,
        })
        .expect("valid parameters");

        let DistributionSeries::Surface(surface) = series else {
            panic!("expected a surface");
        };
        assert_eq!(surface.axis.len(), 21);
        assert_eq!(surface.field.dim(), (21, 21));
        assert!((surface.field[(10, 10)] - 1.0).abs() < f64::EPSILON);
        assert!(surface.field[(0, 0)].abs() < f64::EPSILON);
        assert!(surface.field.iter().all(|value| (0.0..=1.0).contains(value)));
        assert!((surface.peak - 1.0 / (8.0 * std::f64::consts::PI)).abs() < 1e-12);
        assert_eq!(surface.summary.count, 441);
        assert!((surface.field[(10, 12)] - surface.field[(12, 10)]).abs() < 1e-12);
    }

    // Tests the 2D sweep rejects non-positive σ and step on its own
    // Verified by validating only the step
    #[test]
    fn test_normal_2d_invalid_parameters() {
        for (std_dev, step) in [(0.0, 1.0), (-2.0, 1.0), (f64::NAN, 1.0), (1.0, 0.0), (1.0, -1.0)] {
            let result = sample_distribution(&DistributionKind::Normal2D { std_dev, step });
            assert!(
                matches!(result, Err(AnalysisError::InvalidParameter { .. })),
                "σ = {std_dev}, step = {step} should fail"
            );
        }
    }

    // Tests a σ whose square underflows is rejected while a tiny representable one stays finite
    // Verified by dividing by σ² directly
    #[test]
    fn test_normal_2d_tiny_std_dev() {
        let underflowing = sample_distribution(&DistributionKind::Normal2D {
            std_dev: 1e-200,
            step: 1.0,
        });
        assert!(matches!(
            underflowing,
            Err(AnalysisError::InvalidParameter {
                parameter: "std_dev",
                ..
            })
        ));

        let Ok(DistributionSeries::Surface(surface)) =
            sample_distribution(&DistributionKind::Normal2D {
                std_dev: 1e-150,
                step: 1.0,
            })
        else {
            panic!("expected a surface");
        };
        assert!(surface.peak.is_finite() && surface.peak > 0.0);
        assert!(surface.summary.mean.is_finite());
        assert!((surface.field[(10, 10)] - 1.0).abs() < f64::EPSILON);
        assert!(surface.field.iter().all(|value| value.is_finite()));
    }

    // Tests a field with no spread normalizes to zeros instead of dividing by zero
    // Verified by dividing by the zero range
    #[test]
    fn test_normal_2d_constant_field() {
        // σ is so wide that every cell evaluates to exactly the peak density
        let Ok(DistributionSeries::Surface(surface)) =
            sample_distribution(&DistributionKind::Normal2D {
                std_dev: 1e150,
                step: 5.0,
            })
        else {
            panic!("expected a surface");
        };

        assert_eq!(surface.field.dim(), (5, 5));
        assert!(surface.field.iter().all(|value| value.abs() < f64::EPSILON));
        assert!(surface.peak > 0.0);
        assert!(surface.summary.variance.abs() < f64::EPSILON);
    }

    // Tests sweep positions include the closing endpoint for exact divisors
    // Verified by dropping the endpoint slack
    #[test]
    fn test_sweep_axis() {
        let axis = sweep_axis(0.1, MAX_DISTRIBUTION_SAMPLES).expect("valid step");
        assert_eq!(axis.len(), 201);
        assert!((axis[200] - 10.0).abs() < 1e-9);

        let coarse = sweep_axis(3.0, MAX_DISTRIBUTION_SAMPLES).expect("valid step");
        assert_eq!(coarse.len(), 7);
        assert!((coarse[6] - 8.0).abs() < f64::EPSILON);

        assert!(sweep_axis(0.1, 100).is_err());
    }
}
