//! Capability adapters.
//!
//! Each adapter implements one of the capability traits from [`crate::core::traits`] on top of
//! a remote inference service. All HTTP adapters share [`HttpEndpoint`] for their location,
//! credentials and timeout.

mod http;

pub mod caption_adapter;
#[cfg(feature = "oar-ocr")]
pub mod oar_ocr_adapter;
pub mod segmentation_adapter;
pub mod text_generation_adapter;
pub mod text_recognition_adapter;

pub use caption_adapter::HttpCaptionGenerator;
pub use http::HttpEndpoint;
#[cfg(feature = "oar-ocr")]
pub use oar_ocr_adapter::{OarOcrConfig, OarOcrRecognizer};
pub use segmentation_adapter::HttpSegmenter;
pub use text_generation_adapter::HttpTextGenerator;
pub use text_recognition_adapter::HttpTextRecognizer;
