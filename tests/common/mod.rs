#![allow(dead_code)]

//! Mock collaborators that record how they were called.

use image::{RgbImage, RgbaImage};
use prodscribe::prelude::*;
use rand::RngCore;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn failure(stage: ProcessingStage, model: &str) -> PipelineError {
    PipelineError::invocation(stage, model, "simulated failure")
}

/// Returns fixed detections, or fails.
pub struct MockRecognizer {
    detections: Vec<TextDetection>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl MockRecognizer {
    pub fn with_text(texts: &[&str]) -> Self {
        Self {
            detections: texts.iter().map(|t| TextDetection::new(*t)).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_text(&[])
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextRecognizer for MockRecognizer {
    fn recognize(&self, _image: &RgbImage) -> CopyResult<Vec<TextDetection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(failure(ProcessingStage::Recognition, "mock-recognizer"));
        }
        Ok(self.detections.clone())
    }

    fn name(&self) -> &str {
        "mock-recognizer"
    }
}

/// Returns a fixed caption, or fails, and records the parameters it received.
pub struct MockCaptioner {
    caption: String,
    fail: bool,
    pub calls: AtomicUsize,
    pub params: Mutex<Vec<CaptionParams>>,
}

impl MockCaptioner {
    pub fn new(caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
            params: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CaptionGenerator for MockCaptioner {
    fn caption(&self, _image: &RgbImage, params: &CaptionParams) -> CopyResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.params.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(failure(ProcessingStage::Captioning, "mock-captioner"));
        }
        Ok(self.caption.clone())
    }

    fn name(&self) -> &str {
        "mock-captioner"
    }
}

/// Records every prompt and answers with a fixed text followed by a random number, so two
/// calls with different random sources produce different descriptions.
pub struct MockGenerator {
    reply: String,
    fail: bool,
    pub prompts: Mutex<Vec<String>>,
    pub params: Mutex<Vec<SamplingParams>>,
}

impl MockGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            prompts: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl TextGenerator for MockGenerator {
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
        rng: &mut dyn RngCore,
    ) -> CopyResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.params.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(failure(ProcessingStage::Generation, "mock-generator"));
        }
        Ok(format!("{} ({})", self.reply, rng.next_u64()))
    }

    fn name(&self) -> &str {
        "mock-generator"
    }
}

/// Applies a fixed alpha mask: the left `opaque_columns` columns are opaque, the rest
/// transparent.
pub struct MaskSegmenter {
    pub opaque_columns: u32,
}

impl ForegroundSegmenter for MaskSegmenter {
    fn segment(&self, image: &RgbImage) -> CopyResult<RgbaImage> {
        Ok(RgbaImage::from_fn(image.width(), image.height(), |x, y| {
            let p = image.get_pixel(x, y);
            let alpha = if x < self.opaque_columns { 255 } else { 0 };
            image::Rgba([p[0], p[1], p[2], alpha])
        }))
    }

    fn name(&self) -> &str {
        "mask-segmenter"
    }
}

/// A small solid-color product photo.
pub fn product_image() -> RgbImage {
    RgbImage::from_pixel(16, 12, image::Rgb([180, 120, 40]))
}
