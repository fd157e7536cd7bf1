//! Raster input and PNG export for the image-producing tools

use crate::io::configuration::CHANNEL_MAX;
use crate::io::error::{AnalysisError, Result};
use image::{EncodableLayout, GrayImage, ImageBuffer, Luma, Pixel, PixelWithColorType, RgbImage};
use ndarray::Array2;
use num_traits::ToPrimitive;
use std::path::Path;
use tracing::info;

/// Load any raster format the `image` crate understands as 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| AnalysisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Save an image, creating the parent directory when needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_image<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, output_path: &Path) -> Result<()>
where
    P: Pixel + PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| AnalysisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| AnalysisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    info!(path = %output_path.display(), "image written");
    Ok(())
}

/// Render a normalized field as grayscale with the first row at the bottom
///
/// Values are clamped to `[0, 1]` before scaling to `[0, 255]`, so row 0 of the
/// field (smallest y) becomes the bottom row of the image.
///
/// # Errors
///
/// Returns `InvalidImage` if the field is empty or too large for an image
pub fn density_heatmap(field: &Array2<f64>) -> Result<GrayImage> {
    let (rows, cols) = field.dim();
    let invalid = |reason: &str| AnalysisError::InvalidImage {
        width: u32::try_from(cols).unwrap_or(u32::MAX),
        height: u32::try_from(rows).unwrap_or(u32::MAX),
        reason: reason.to_string(),
    };

    if rows == 0 || cols == 0 {
        return Err(invalid("density field has no samples"));
    }
    let width = u32::try_from(cols).map_err(|e| invalid(&format!("field is too wide: {e}")))?;
    let height = u32::try_from(rows).map_err(|e| invalid(&format!("field is too tall: {e}")))?;

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let row = rows - 1 - y as usize;
        let value = field.get((row, x as usize)).copied().unwrap_or(0.0);
        let gray = (value.clamp(0.0, 1.0) * CHANNEL_MAX)
            .round()
            .to_u8()
            .unwrap_or(0);
        Luma([gray])
    }))
}
