//! Tests for seeded point cloud generation

#[cfg(test)]
mod tests {
    use eigenscope::AnalysisError;
    use eigenscope::spatial::points::{PointCloud, PointGeneration, PointPattern, PointSampler};
    use eigenscope::spatial::viewport::Viewport;
    use nalgebra::Point2;

    fn uniform(count: usize, append: bool) -> PointGeneration {
        PointGeneration {
            count,
            append,
            pattern: PointPattern::Uniform,
        }
    }

    // Tests uniform points stay inside the viewport
    // Verified by sampling over twice the viewport width
    #[test]
    fn test_uniform_points_inside_viewport() {
        let viewport = Viewport::default();
        let mut sampler = PointSampler::new(7);
        let mut cloud = PointCloud::new();

        cloud
            .generate(&uniform(500, false), &mut sampler, &viewport)
            .expect("uniform generation succeeds");

        assert_eq!(cloud.len(), 500);
        assert!(cloud.points().iter().all(|point| viewport.contains(point)));
    }

    // Tests the same seed reproduces the same cloud
    // Verified by seeding from entropy
    #[test]
    fn test_generation_is_reproducible() {
        let viewport = Viewport::default();
        let generate = |seed| {
            let mut sampler = PointSampler::new(seed);
            let mut cloud = PointCloud::new();
            cloud
                .generate(&uniform(20, false), &mut sampler, &viewport)
                .expect("uniform generation succeeds");
            cloud.into_points()
        };

        assert_eq!(generate(42), generate(42));
        assert_ne!(generate(42), generate(43));
    }

    // Tests append keeps existing points while a fresh batch replaces them
    // Verified by ignoring the append flag
    #[test]
    fn test_append_and_replace() {
        let viewport = Viewport::default();
        let mut sampler = PointSampler::new(1);
        let mut cloud = PointCloud::from_points(vec![Point2::new(0.5, 0.5)]);

        cloud
            .generate(&uniform(3, true), &mut sampler, &viewport)
            .expect("append succeeds");
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.points()[0], Point2::new(0.5, 0.5));

        cloud
            .generate(&uniform(2, false), &mut sampler, &viewport)
            .expect("replace succeeds");
        assert_eq!(cloud.len(), 2);

        cloud.clear();
        assert!(cloud.is_empty());
    }

    // Tests segment points lie within the radius band around the segment
    // Verified by jittering along the segment direction instead of its normal
    #[test]
    fn test_segment_points_within_band() {
        let start = Point2::new(-5.0, -5.0);
        let end = Point2::new(5.0, 5.0);
        let radius = 0.2;
        let generation = PointGeneration {
            count: 300,
            append: false,
            pattern: PointPattern::Segment { start, end, radius },
        };
        let mut sampler = PointSampler::new(3);
        let mut cloud = PointCloud::new();

        cloud
            .generate(&generation, &mut sampler, &Viewport::default())
            .expect("segment generation succeeds");

        let direction = (end - start).normalize();
        for point in cloud.points() {
            let offset = *point - start;
            let along = offset.dot(&direction);
            let across = (offset - direction * along).norm();
            assert!(across <= radius + 1e-12, "point {point:?} is {across} from the line");
            assert!((-1e-12..=(end - start).norm() + 1e-12).contains(&along));
        }
    }

    // Tests a zero-length segment places every point at its start
    // Verified by normalizing the zero direction
    #[test]
    fn test_degenerate_segment() {
        let mut sampler = PointSampler::new(0);
        let start = Point2::new(1.0, 2.0);

        for _ in 0..10 {
            assert_eq!(sampler.along_segment(&start, &start, 0.5), start);
        }
    }

    // Tests a negative radius or non-finite endpoint is rejected and the cloud is untouched
    // Verified by validating after clearing the cloud
    #[test]
    fn test_invalid_segment_rejected() {
        let mut sampler = PointSampler::new(0);
        let mut cloud = PointCloud::from(vec![Point2::origin()]);

        let negative = PointGeneration {
            count: 5,
            append: false,
            pattern: PointPattern::Segment {
                start: Point2::origin(),
                end: Point2::new(1.0, 0.0),
                radius: -0.1,
            },
        };
        let result = cloud.generate(&negative, &mut sampler, &Viewport::default());
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidParameter {
                parameter: "radius",
                ..
            })
        ));

        let infinite = PointGeneration {
            count: 5,
            append: false,
            pattern: PointPattern::Segment {
                start: Point2::new(f64::INFINITY, 0.0),
                end: Point2::new(1.0, 0.0),
                radius: 0.1,
            },
        };
        assert!(
            cloud
                .generate(&infinite, &mut sampler, &Viewport::default())
                .is_err()
        );
        assert_eq!(cloud.len(), 1);
    }
}
