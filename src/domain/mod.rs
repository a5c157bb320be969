//! Domain types and capability adapters.
//!
//! This module contains the value types exchanged with the leaf capabilities and the
//! [`adapters`] that implement those capabilities on top of remote inference services.

pub mod adapters;
pub mod text_detection;
pub mod token;

pub use text_detection::{DetectionBox, TextDetection, concatenated_text};
pub use token::{PosRole, TaggedToken};
