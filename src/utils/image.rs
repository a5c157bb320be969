//! Image loading and encoding.
//!
//! Every image that enters the pipeline is converted to 8-bit RGB first, whatever its source
//! format; alpha channels of inputs are discarded.

use crate::core::errors::{CopyResult, PipelineError};
use image::{ImageFormat, RgbImage, codecs::jpeg::JpegEncoder};
use std::io::Cursor;
use std::path::Path;

/// JPEG quality used for encoded outputs.
pub const JPEG_QUALITY: u8 = 90;

/// Decodes an image held in memory and converts it to RGB.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidInput`] for an empty buffer and
/// [`PipelineError::ImageLoad`] when the bytes are not a supported image.
pub fn load_image_from_bytes(bytes: &[u8]) -> CopyResult<RgbImage> {
    if bytes.is_empty() {
        return Err(PipelineError::InvalidInput {
            message: "image payload is empty".to_string(),
        });
    }
    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Loads an image from a file path and converts it to RGB.
pub fn load_image_from_path(path: &Path) -> CopyResult<RgbImage> {
    let img = image::open(path)?;
    Ok(img.to_rgb8())
}

/// Encodes an RGB image as PNG.
pub fn encode_png(image: &RgbImage) -> CopyResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encodes an RGB image as JPEG at [`JPEG_QUALITY`].
pub fn encode_jpeg(image: &RgbImage) -> CopyResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    image.write_with_encoder(encoder)?;
    Ok(bytes)
}
