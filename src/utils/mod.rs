//! Utility functions for the pipeline.
//!
//! This module provides image loading and encoding helpers and logging setup.

pub mod image;

pub use self::image::{encode_jpeg, encode_png, load_image_from_bytes, load_image_from_path};

/// Initializes the tracing subscriber for logging.
///
/// The filter is read from `RUST_LOG`; when it is unset, `info` is used.
/// Typically called once at the start of an application.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
