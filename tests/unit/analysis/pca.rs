//! Tests for single-component image PCA encoding and decoding

#[cfg(test)]
mod tests {
    use eigenscope::AnalysisError;
    use eigenscope::analysis::pca::{PcaCodec, reconstruction_error, scatter_matrix};
    use image::{GrayImage, Rgb, RgbImage};
    use nalgebra::{Matrix3, Vector3};
    use ndarray::Array2;

    // Colors (10k, 20k, 20k) all lie on the ray through (1, 2, 2)
    fn collinear_image() -> RgbImage {
        RgbImage::from_fn(11, 3, |x, _| {
            let k = x as u8;
            Rgb([10 * k, 20 * k, 20 * k])
        })
    }

    // Tests the scatter matrix equals Σ x xᵀ over the pixels
    // Verified by accumulating x + xᵀ
    #[test]
    fn test_scatter_matrix() {
        let image = RgbImage::from_vec(2, 1, vec![1, 2, 3, 4, 5, 6]).expect("buffer size matches");
        let first = Vector3::new(1.0, 2.0, 3.0);
        let second = Vector3::new(4.0, 5.0, 6.0);
        let expected: Matrix3<f64> = first * first.transpose() + second * second.transpose();

        assert_eq!(scatter_matrix(&image), expected);
    }

    // Tests the principal direction of collinear colors is their common direction
    // Verified by taking the eigenvector of the smallest eigenvalue
    #[test]
    fn test_encode_collinear_direction() {
        let encoding = PcaCodec::encode(&collinear_image()).expect("non-empty image");

        let expected = Vector3::new(1.0, 2.0, 2.0) / 3.0;
        assert!((encoding.direction - expected).norm() < 1e-9);
        assert_eq!(encoding.projections.dim(), (3, 11));
        assert!((encoding.gray_bound - 425.0).abs() < 1e-6);

        let projection = encoding.projections.get((1, 4)).copied().unwrap_or_default();
        assert!((projection - 120.0).abs() < 1e-6);
    }

    // Tests collinear colors survive the round trip exactly
    // Verified by truncating instead of rounding channel values
    #[test]
    fn test_round_trip_is_lossless_on_axis() {
        let image = collinear_image();
        let encoding = PcaCodec::encode(&image).expect("non-empty image");
        let decoded =
            PcaCodec::decode(&encoding.projections, &encoding.direction).expect("non-empty");

        assert_eq!(decoded, image);
        assert!(
            reconstruction_error(&image, &decoded)
                .expect("same size")
                .abs()
                < f64::EPSILON
        );
    }

    // Tests the gray preview is s·255/bound and decodes back to the original
    // Verified by scaling gray by the largest projection
    #[test]
    fn test_grayscale_preview_round_trip() {
        let image = collinear_image();
        let encoding = PcaCodec::encode(&image).expect("non-empty image");

        assert_eq!(encoding.grayscale.get_pixel(10, 0).0[0], 180);
        assert_eq!(encoding.grayscale.get_pixel(0, 2).0[0], 0);

        let decoded = PcaCodec::decode_grayscale(
            &encoding.grayscale,
            &encoding.direction,
            encoding.gray_bound,
        )
        .expect("non-empty");
        assert_eq!(decoded, image);
    }

    // Tests off-axis colors produce a reconstruction error that grows with the spread
    // Verified by reconstructing from the original pixels
    #[test]
    fn test_off_axis_error_grows() {
        let narrow = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([200, 180, 0]) } else { Rgb([180, 200, 0]) }
        });
        let wide = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([200, 0, 0]) } else { Rgb([0, 200, 0]) }
        });

        let error = |image: &RgbImage| {
            let encoding = PcaCodec::encode(image).expect("non-empty image");
            let decoded =
                PcaCodec::decode(&encoding.projections, &encoding.direction).expect("non-empty");
            reconstruction_error(image, &decoded).expect("same size")
        };

        let narrow_error = error(&narrow);
        let wide_error = error(&wide);
        assert!(narrow_error > 0.0);
        assert!(wide_error > narrow_error);
    }

    // Tests decoding clamps channels into [0, 255]
    // Verified by wrapping out-of-range values
    #[test]
    fn test_decode_clamps() {
        let projections =
            Array2::from_shape_vec((1, 2), vec![-50.0, 1000.0]).expect("shape matches");
        let direction = Vector3::new(1.0, 0.0, 0.0);

        let decoded = PcaCodec::decode(&projections, &direction).expect("non-empty");

        assert_eq!(decoded.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(decoded.get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    // Tests a black image encodes to zero projections without failing
    // Verified by dividing by the zero scatter eigenvalue
    #[test]
    fn test_black_image() {
        let image = RgbImage::new(4, 4);
        let encoding = PcaCodec::encode(&image).expect("non-empty image");

        assert!(encoding.projections.iter().all(|value| value.abs() < f64::EPSILON));
        assert!(encoding.grayscale.pixels().all(|pixel| pixel.0[0] == 0));
        assert!(encoding.gray_bound > 0.0);
    }

    // Tests empty images, projections and mismatched sizes are rejected
    // Verified by skipping the dimension check
    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            PcaCodec::encode(&RgbImage::new(0, 5)),
            Err(AnalysisError::InvalidImage { .. })
        ));
        assert!(
            PcaCodec::decode(&Array2::zeros((0, 3)), &Vector3::new(1.0, 0.0, 0.0)).is_err()
        );
        assert!(
            PcaCodec::decode_grayscale(&GrayImage::new(2, 2), &Vector3::new(1.0, 0.0, 0.0), 0.0)
                .is_err()
        );
        assert!(reconstruction_error(&RgbImage::new(2, 2), &RgbImage::new(3, 2)).is_err());
    }
}
