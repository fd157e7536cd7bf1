//! Principal component compression of RGB images onto one color axis
//!
//! Every pixel is treated as a vector in color space. The dominant eigenvector
//! of the pixel scatter matrix is the direction that keeps the most energy;
//! projecting onto it gives one scalar per pixel (the encoding), and scaling
//! the direction by that scalar gives the reconstruction.

use crate::io::configuration::CHANNEL_MAX;
use crate::io::error::{AnalysisError, Result, require_positive};
use crate::math::eigen::dominant_eigenvector_3x3;
use image::{GrayImage, Luma, Rgb, RgbImage};
use nalgebra::{Matrix3, Vector3};
use ndarray::Array2;
use num_traits::ToPrimitive;
use tracing::{debug, warn};

/// Result of projecting an image onto its principal color direction
#[derive(Debug, Clone)]
pub struct PcaEncoding {
    /// Unit principal direction in RGB space
    pub direction: Vector3<f64>,
    /// Largest eigenvalue of the scatter matrix
    pub eigenvalue: f64,
    /// Scatter matrix `Σ x xᵀ` over all pixels
    pub scatter: Matrix3<f64>,
    /// Scalar projection per pixel, indexed by (row, column)
    pub projections: Array2<f64>,
    /// Projections scaled into 8-bit gray by `gray_bound`
    pub grayscale: GrayImage,
    /// Projection value mapped to white in `grayscale`
    ///
    /// Normally `d·(255, 255, 255)`. That is an upper bound rather than the
    /// real maximum, so the preview may not reach full white.
    pub gray_bound: f64,
}

/// Encoder and decoder for single-component image PCA
#[derive(Debug, Clone, Copy, Default)]
pub struct PcaCodec;

impl PcaCodec {
    /// Project every pixel onto the dominant color direction
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image has zero width or height
    /// - The scatter matrix eigen-decomposition fails
    pub fn encode(image: &RgbImage) -> Result<PcaEncoding> {
        validate_dimensions(image.width(), image.height())?;

        let scatter = scatter_matrix(image);
        let (eigenvalue, direction) = dominant_eigenvector_3x3(&scatter)?;
        debug!(
            scatter = ?scatter,
            direction = ?direction,
            eigenvalue,
            "principal color direction"
        );

        let mut projections =
            Array2::<f64>::zeros((image.height() as usize, image.width() as usize));
        for (x, y, pixel) in image.enumerate_pixels() {
            if let Some(value) = projections.get_mut((y as usize, x as usize)) {
                *value = direction.dot(&pixel_vector(pixel));
            }
        }

        let gray_bound = gray_bound(&direction, &projections);
        let grayscale = GrayImage::from_fn(image.width(), image.height(), |x, y| {
            let value = projections
                .get((y as usize, x as usize))
                .copied()
                .unwrap_or(0.0);
            Luma([channel_value(value * CHANNEL_MAX / gray_bound)])
        });

        Ok(PcaEncoding {
            direction,
            eigenvalue,
            scatter,
            projections,
            grayscale,
            gray_bound,
        })
    }

    /// Rebuild an RGB image as `direction · s` for every projection `s`
    ///
    /// Channels are clamped to `[0, 255]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidImage` if the projection array is empty or too large
    /// for an image
    pub fn decode(projections: &Array2<f64>, direction: &Vector3<f64>) -> Result<RgbImage> {
        let (rows, cols) = projections.dim();
        let width = image_extent(cols, rows, cols)?;
        let height = image_extent(rows, rows, cols)?;
        validate_dimensions(width, height)?;

        Ok(RgbImage::from_fn(width, height, |x, y| {
            let value = projections
                .get((y as usize, x as usize))
                .copied()
                .unwrap_or(0.0);
            let color = *direction * value;
            Rgb([
                channel_value(color.x),
                channel_value(color.y),
                channel_value(color.z),
            ])
        }))
    }

    /// Rebuild from the 8-bit preview by undoing the gray scaling first
    ///
    /// # Errors
    ///
    /// Returns an error if the gray image is empty or `gray_bound` is not a
    /// positive finite number
    pub fn decode_grayscale(
        grayscale: &GrayImage,
        direction: &Vector3<f64>,
        gray_bound: f64,
    ) -> Result<RgbImage> {
        validate_dimensions(grayscale.width(), grayscale.height())?;
        let gray_bound = require_positive("gray_bound", gray_bound)?;

        let mut projections =
            Array2::<f64>::zeros((grayscale.height() as usize, grayscale.width() as usize));
        for (x, y, pixel) in grayscale.enumerate_pixels() {
            if let Some(value) = projections.get_mut((y as usize, x as usize)) {
                *value = f64::from(pixel.0[0]) * gray_bound / CHANNEL_MAX;
            }
        }

        Self::decode(&projections, direction)
    }
}

/// Scatter matrix `Σ x xᵀ` of the pixel colors, accumulated in one pass
pub fn scatter_matrix(image: &RgbImage) -> Matrix3<f64> {
    image.pixels().fold(Matrix3::zeros(), |scatter, pixel| {
        let color = pixel_vector(pixel);
        scatter + color * color.transpose()
    })
}

/// Root-mean-square per-channel difference between two images
///
/// # Errors
///
/// Returns `InvalidImage` if the images are empty or differ in size
pub fn reconstruction_error(original: &RgbImage, reconstructed: &RgbImage) -> Result<f64> {
    validate_dimensions(original.width(), original.height())?;
    if original.dimensions() != reconstructed.dimensions() {
        return Err(AnalysisError::InvalidImage {
            width: reconstructed.width(),
            height: reconstructed.height(),
            reason: format!(
                "reconstruction must match the original size {}x{}",
                original.width(),
                original.height()
            ),
        });
    }

    let squared_sum: f64 = original
        .as_raw()
        .iter()
        .zip(reconstructed.as_raw())
        .map(|(&a, &b)| {
            let difference = f64::from(a) - f64::from(b);
            difference * difference
        })
        .sum();

    Ok((squared_sum / original.as_raw().len() as f64).sqrt())
}

fn pixel_vector(pixel: &Rgb<u8>) -> Vector3<f64> {
    let [r, g, b] = pixel.0;
    Vector3::new(f64::from(r), f64::from(g), f64::from(b))
}

fn gray_bound(direction: &Vector3<f64>, projections: &Array2<f64>) -> f64 {
    let white_projection = direction.dot(&Vector3::repeat(CHANNEL_MAX));
    if white_projection > f64::EPSILON {
        return white_projection;
    }

    let largest = projections
        .iter()
        .fold(0.0_f64, |largest, value| largest.max(value.abs()));
    warn!(
        white_projection,
        largest, "principal direction projects white to zero, scaling gray by largest projection"
    );
    if largest > 0.0 { largest } else { 1.0 }
}

fn channel_value(value: f64) -> u8 {
    value.clamp(0.0, CHANNEL_MAX).round().to_u8().unwrap_or(0)
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AnalysisError::InvalidImage {
            width,
            height,
            reason: "image has no pixels".to_string(),
        });
    }
    Ok(())
}

fn image_extent(extent: usize, rows: usize, cols: usize) -> Result<u32> {
    u32::try_from(extent).map_err(|e| AnalysisError::InvalidImage {
        width: u32::try_from(cols).unwrap_or(u32::MAX),
        height: u32::try_from(rows).unwrap_or(u32::MAX),
        reason: format!("projection array too large for an image: {e}"),
    })
}
