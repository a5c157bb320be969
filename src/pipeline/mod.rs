//! The title/description pipeline.
//!
//! This module wires the capability traits into the two title paths, the description generator
//! and the background remover:
//!
//! * [`extract_title`] - recognized text to title
//! * [`caption_title`] - caption to title, used when no text was detected
//! * [`DescriptionGenerator`] - title to marketing copy
//! * [`CopyPipeline`] - routes an image through the above
//! * [`BackgroundRemover`] - flattens a segmented image onto white

mod background;
mod caption;
mod controller;
mod description;
mod result;
mod title;

pub use background::{BackgroundRemover, composite_on_white};
pub use caption::caption_title;
pub use controller::{CopyPipeline, CopyPipelineBuilder};
pub use description::DescriptionGenerator;
pub use result::{PipelineResult, TitleSource};
pub use title::extract_title;
