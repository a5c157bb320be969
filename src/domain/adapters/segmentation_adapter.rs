//! Foreground segmentation over HTTP.
//!
//! The image is sent as a PNG request body; the service answers with the matted image
//! (PNG or any other format carrying an alpha channel).

use super::http::{HttpClient, HttpEndpoint};
use crate::core::errors::{CopyResult, ProcessingStage};
use crate::core::traits::ForegroundSegmenter;
use image::{RgbImage, RgbaImage};

const ADAPTER_NAME: &str = "HttpSegmenter";

/// [`ForegroundSegmenter`] backed by a remote matting service.
pub struct HttpSegmenter {
    client: HttpClient,
}

impl HttpSegmenter {
    /// Creates a segmenter for the given endpoint.
    pub fn new(endpoint: HttpEndpoint) -> CopyResult<Self> {
        Ok(Self {
            client: HttpClient::new(endpoint, ProcessingStage::Segmentation, ADAPTER_NAME)?,
        })
    }

    fn decode_matte(&self, bytes: &[u8], width: u32, height: u32) -> CopyResult<RgbaImage> {
        let matte = image::load_from_memory(bytes)
            .map_err(|e| self.client.error_with_source("undecodable matte", e))?
            .to_rgba8();

        if matte.dimensions() != (width, height) {
            return Err(self.client.error(format!(
                "matte is {}x{}, expected {}x{}",
                matte.width(),
                matte.height(),
                width,
                height
            )));
        }
        Ok(matte)
    }
}

impl ForegroundSegmenter for HttpSegmenter {
    fn segment(&self, image: &RgbImage) -> CopyResult<RgbaImage> {
        let png = crate::utils::encode_png(image)?;
        let bytes = self.client.post_bytes("image/png", &png)?;
        self.decode_matte(&bytes, image.width(), image.height())
    }

    fn name(&self) -> &str {
        ADAPTER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PipelineError;
    use image::Rgba;

    fn segmenter() -> HttpSegmenter {
        HttpSegmenter::new(HttpEndpoint::new("http://localhost:7000/api/remove")).unwrap()
    }

    fn encoded_matte(width: u32, height: u32) -> Vec<u8> {
        let matte = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 0]));
        let mut bytes = Vec::new();
        matte
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_matte_keeps_alpha() {
        let matte = segmenter().decode_matte(&encoded_matte(3, 2), 3, 2).unwrap();
        assert_eq!(matte.dimensions(), (3, 2));
        assert_eq!(matte.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_decode_matte_rejects_dimension_mismatch() {
        let err = segmenter()
            .decode_matte(&encoded_matte(3, 2), 4, 2)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ModelInvocation {
                stage: ProcessingStage::Segmentation,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_matte_rejects_garbage() {
        assert!(segmenter().decode_matte(b"not an image", 1, 1).is_err());
    }
}
