//! HTTP server for title, description and background processing.

use crate::config::ServerConfig;
use crate::engine::{Downloader, ServiceError, build_pipeline, build_remover, decode_image};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use image::RgbImage;
use prodscribe::pipeline::{BackgroundRemover, CopyPipeline};
use prodscribe::utils::encode_jpeg;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Name of the multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

/// Application state shared across handlers
pub struct AppState {
    pub pipeline: Arc<CopyPipeline>,
    pub remover: Option<Arc<BackgroundRemover>>,
    pub downloader: Downloader,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Request to describe an image by URL
#[derive(Debug, Deserialize)]
pub struct DescribeRequest {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Title-only response
#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub title: String,
}

/// Run the HTTP server
pub async fn run_server(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Initializing pipeline...");
    let pipeline = Arc::new(build_pipeline(&config.engine)?);
    let remover = build_remover(&config.engine)?.map(Arc::new);
    let downloader = Downloader::new(config.download_timeout)?;
    info!("Pipeline initialized successfully");

    let state = Arc::new(AppState {
        pipeline,
        remover,
        downloader,
    });

    let app = router(state);

    // Parse address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    info!("Server listening on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /health                                 - Health check");
    info!("  POST /generate-title-and-description         - Title and description from an image URL");
    info!("  POST /api/v1/generate-title-and-description  - Same (versioned API)");
    info!("  POST /generate-title                         - Title from an uploaded image");
    info!("  POST /remove-background                      - White background for an uploaded image");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Builds the router over the given state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/generate-title-and-description", post(describe_handler))
        .route("/api/v1/generate-title-and-description", post(describe_handler))
        .route("/generate-title", post(title_handler))
        .route("/remove-background", post(remove_background_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Title and description for an image URL.
///
/// The body is read as JSON whatever its content type.
async fn describe_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let request: DescribeRequest = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let url = request
        .image_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ServiceError::BadRequest("No image_url provided".to_string()))?;
    info!(request_id = %request_id, url = %url, "Processing describe request");

    let start = Instant::now();
    let image = state.downloader.download_image(&url).await.inspect_err(|e| {
        error!(request_id = %request_id, error = %e, "Failed to download image");
    })?;
    info!(
        request_id = %request_id,
        width = image.width(),
        height = image.height(),
        download_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Image downloaded"
    );

    let pipeline = state.pipeline.clone();
    let result = run_blocking(move || pipeline.synthesize(&image))
        .await
        .inspect_err(|e| {
            error!(request_id = %request_id, error = %e, "Copy synthesis failed");
        })?;

    info!(
        request_id = %request_id,
        title = %result.title,
        total_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Describe completed"
    );
    Ok(Json(result))
}

/// Title for an uploaded image
async fn title_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let image = read_image_field(multipart).await?;
    info!(
        request_id = %request_id,
        width = image.width(),
        height = image.height(),
        "Processing title request"
    );

    let pipeline = state.pipeline.clone();
    let title = run_blocking(move || pipeline.title(&image))
        .await
        .inspect_err(|e| {
            error!(request_id = %request_id, error = %e, "Title extraction failed");
        })?;

    info!(request_id = %request_id, title = %title, "Title completed");
    Ok(Json(TitleResponse { title }))
}

/// White-background JPEG for an uploaded image
async fn remove_background_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ServiceError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let remover = state.remover.clone().ok_or_else(|| {
        ServiceError::NotConfigured("Background removal is not configured".to_string())
    })?;
    let image = read_image_field(multipart).await?;
    info!(
        request_id = %request_id,
        width = image.width(),
        height = image.height(),
        "Processing remove-background request"
    );

    let start = Instant::now();
    let jpeg = run_blocking(move || {
        let flattened = remover.remove_background(&image)?;
        encode_jpeg(&flattened)
    })
    .await
    .inspect_err(|e| {
        error!(request_id = %request_id, error = %e, "Background removal failed");
    })?;

    info!(
        request_id = %request_id,
        bytes = jpeg.len(),
        ms = start.elapsed().as_secs_f64() * 1000.0,
        "Background removed"
    );
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg))
}

/// Reads and decodes the `image` multipart field.
async fn read_image_field(mut multipart: Multipart) -> Result<RgbImage, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServiceError::BadRequest(format!("Failed to read upload: {}", e)))?;
            return decode_image(&bytes);
        }
    }
    Err(ServiceError::BadRequest("No image uploaded".to_string()))
}

/// Runs pipeline work on the blocking pool; collaborators block on network I/O.
async fn run_blocking<T, F>(work: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> prodscribe::core::CopyResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServiceError::Worker(e.to_string()))?
        .map_err(ServiceError::from)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        }
    }
}
