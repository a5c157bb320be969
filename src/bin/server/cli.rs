//! CLI mode for title, description and background processing.

use crate::config::EngineConfig;
use crate::engine::{Downloader, ServiceError, build_pipeline, build_remover, decode_image};
use prodscribe::pipeline::PipelineResult;
use prodscribe::utils::load_image_from_path;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Describe an image fetched from a URL
pub async fn describe_url(
    url: &str,
    config: &EngineConfig,
    download_timeout: Duration,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    info!("Downloading image from URL...");
    let bytes = Downloader::new(download_timeout)?.download_bytes(url).await?;
    info!(
        "Downloaded {} bytes in {:.2}ms",
        bytes.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    let image = decode_image(&bytes)?;

    let config = config.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<PipelineResult, ServiceError> {
        let pipeline = build_pipeline(&config)?;
        info!("Processing image ({}x{})...", image.width(), image.height());
        Ok(pipeline.synthesize(&image)?)
    })
    .await??;

    output_result(&result, output_format, start.elapsed().as_secs_f64() * 1000.0)?;
    Ok(())
}

/// Describe a local image file
pub fn describe_file(
    path: &Path,
    config: &EngineConfig,
    output_format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    info!("Loading image from file...");
    let image = load_image_from_path(path)?;

    info!("Initializing pipeline...");
    let pipeline = build_pipeline(config)?;

    info!("Processing image ({}x{})...", image.width(), image.height());
    let result = pipeline.synthesize(&image)?;

    output_result(&result, output_format, start.elapsed().as_secs_f64() * 1000.0)?;
    Ok(())
}

/// Replace the background of a local image file with white
pub fn remove_background_file(
    input: &Path,
    output: &Path,
    config: &EngineConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let start = Instant::now();

    let remover = build_remover(config)?.ok_or_else(|| {
        ServiceError::Config("missing --segmenter-url (or PRODSCRIBE_SEGMENTER_URL)".to_string())
    })?;

    info!("Loading image from file...");
    let image = load_image_from_path(input)?;

    info!("Removing background ({}x{})...", image.width(), image.height());
    let flattened = remover.remove_background(&image)?;
    flattened.save(output)?;

    info!(
        "Wrote {} in {:.2}ms",
        output.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

/// Output the result in the specified format
fn output_result(
    result: &PipelineResult,
    format: &str,
    processing_time_ms: f64,
) -> Result<(), serde_json::Error> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string(result)?);
        }
        _ => {
            println!("\n=== Product Copy ===");
            println!("Title source: {:?}", result.source);
            println!("Processing time: {:.2}ms", processing_time_ms);
            println!();
            if result.is_title_empty() {
                println!("Title: <no keywords found>");
            } else {
                println!("Title: {}", result.title);
            }
            println!();
            println!("--- Description ---");
            println!("{}", result.description);
        }
    }

    Ok(())
}
