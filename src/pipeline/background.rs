//! Background replacement.

use crate::core::errors::{CopyResult, PipelineError, ProcessingStage};
use crate::core::traits::ForegroundSegmenter;
use image::{Rgb, RgbImage, RgbaImage};
use std::sync::Arc;

/// Replaces the background of product images with solid white.
///
/// Independent of [`CopyPipeline`](super::CopyPipeline); it shares no state with it.
#[derive(Clone)]
pub struct BackgroundRemover {
    segmenter: Arc<dyn ForegroundSegmenter>,
}

impl std::fmt::Debug for BackgroundRemover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundRemover")
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}

impl BackgroundRemover {
    pub fn new(segmenter: Arc<dyn ForegroundSegmenter>) -> Self {
        Self { segmenter }
    }

    /// Segments the image and flattens the foreground onto white.
    ///
    /// The output has the same dimensions as the input. Fully transparent pixels become pure
    /// white and fully opaque pixels keep their color.
    pub fn remove_background(&self, image: &RgbImage) -> CopyResult<RgbImage> {
        let matte = self.segmenter.segment(image)?;
        if matte.dimensions() != image.dimensions() {
            return Err(PipelineError::invocation(
                ProcessingStage::Composition,
                self.segmenter.name(),
                format!(
                    "segmented image is {}x{}, input is {}x{}",
                    matte.width(),
                    matte.height(),
                    image.width(),
                    image.height()
                ),
            ));
        }

        tracing::debug!(
            target: "background",
            segmenter = self.segmenter.name(),
            width = image.width(),
            height = image.height(),
            "foreground segmented"
        );
        Ok(composite_on_white(&matte))
    }
}

/// Alpha-blends an RGBA image over an opaque white canvas of the same size.
pub fn composite_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let pixel = rgba.get_pixel(x, y);
        let alpha = u32::from(pixel[3]);
        let blend = |channel: u8| -> u8 {
            let value = (u32::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
            value as u8
        };
        Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_composite_extremes_and_midpoint() {
        let mut rgba = RgbaImage::new(3, 1);
        rgba.put_pixel(0, 0, Rgba([12, 34, 56, 0]));
        rgba.put_pixel(1, 0, Rgba([12, 34, 56, 255]));
        rgba.put_pixel(2, 0, Rgba([0, 0, 0, 128]));

        let out = composite_on_white(&rgba);
        assert_eq!(out.dimensions(), (3, 1));
        assert_eq!(out.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([12, 34, 56]));
        assert_eq!(out.get_pixel(2, 0), &Rgb([127, 127, 127]));
    }

    struct Shrinking;

    impl ForegroundSegmenter for Shrinking {
        fn segment(&self, image: &RgbImage) -> CopyResult<RgbaImage> {
            Ok(RgbaImage::new(image.width() / 2, image.height()))
        }

        fn name(&self) -> &str {
            "shrinking"
        }
    }

    #[test]
    fn test_dimension_mismatch_is_a_composition_error() {
        let remover = BackgroundRemover::new(Arc::new(Shrinking));
        let err = remover.remove_background(&RgbImage::new(4, 4)).unwrap_err();
        assert_eq!(err.stage(), Some(ProcessingStage::Composition));
    }
}
