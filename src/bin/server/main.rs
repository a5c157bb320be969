//! Prodscribe server and CLI
//!
//! A binary that derives a product title and description from a photograph, or replaces a
//! photograph's background with white, via CLI or HTTP server.
//!
//! # Usage
//!
//! ## CLI Mode
//! ```bash
//! prodscribe-server describe --file product.jpg --ocr-url http://localhost:8000/ocr \
//!     --caption-url http://localhost:8001/caption --generator-url http://localhost:8002/generate
//! prodscribe-server describe --url "https://example.com/product.jpg" --output json
//! prodscribe-server remove-background --file product.jpg --output white.jpg \
//!     --segmenter-url http://localhost:7000/api/remove
//! ```
//!
//! ## Server Mode
//! ```bash
//! prodscribe-server serve --port 5000
//! ```
//!
//! Every collaborator flag can also be set through its `PRODSCRIBE_*` environment variable.

mod cli;
mod config;
mod engine;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "prodscribe-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Product titles, descriptions and white backgrounds via CLI or HTTP server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Collaborator endpoints shared by every subcommand.
#[derive(Args, Clone)]
struct CollaboratorArgs {
    /// URL of the text recognition service
    #[arg(long = "ocr-url", env = "PRODSCRIBE_OCR_URL")]
    ocr_url: Option<String>,

    /// URL of the image captioning service
    #[arg(long = "caption-url", env = "PRODSCRIBE_CAPTION_URL")]
    caption_url: Option<String>,

    /// URL of the text generation service
    #[arg(long = "generator-url", env = "PRODSCRIBE_GENERATOR_URL")]
    generator_url: Option<String>,

    /// URL of the foreground segmentation service
    #[arg(long = "segmenter-url", env = "PRODSCRIBE_SEGMENTER_URL")]
    segmenter_url: Option<String>,

    /// Bearer token sent to every collaborator
    #[arg(long = "api-token", env = "PRODSCRIBE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Timeout for each collaborator call, in seconds
    #[arg(long = "http-timeout", default_value = "60", env = "PRODSCRIBE_HTTP_TIMEOUT")]
    http_timeout: u64,

    /// JSON file with pipeline parameters
    #[arg(long = "pipeline-config", env = "PRODSCRIBE_PIPELINE_CONFIG")]
    pipeline_config: Option<PathBuf>,

    /// Path to the text detection model (in-process recognition)
    #[cfg(feature = "oar-ocr")]
    #[arg(long = "det-model", env = "PRODSCRIBE_DET_MODEL", requires_all = ["rec_model", "dict_path"])]
    det_model: Option<PathBuf>,

    /// Path to the text recognition model (in-process recognition)
    #[cfg(feature = "oar-ocr")]
    #[arg(long = "rec-model", env = "PRODSCRIBE_REC_MODEL")]
    rec_model: Option<PathBuf>,

    /// Path to the character dictionary (in-process recognition)
    #[cfg(feature = "oar-ocr")]
    #[arg(long = "dict-path", env = "PRODSCRIBE_DICT_PATH")]
    dict_path: Option<PathBuf>,

    /// Device to use for in-process recognition (cpu, cuda, cuda:0, etc.)
    #[cfg(feature = "oar-ocr")]
    #[arg(long, default_value = "cpu", env = "PRODSCRIBE_DEVICE")]
    device: String,
}

impl CollaboratorArgs {
    fn into_config(self) -> config::EngineConfig {
        #[cfg(feature = "oar-ocr")]
        let oar_ocr = match (self.det_model, self.rec_model, self.dict_path) {
            (Some(det_model), Some(rec_model), Some(dict_path)) => {
                Some(prodscribe::domain::adapters::OarOcrConfig {
                    det_model,
                    rec_model,
                    dict_path,
                    device: self.device,
                })
            }
            _ => None,
        };

        config::EngineConfig {
            ocr_url: self.ocr_url,
            caption_url: self.caption_url,
            generator_url: self.generator_url,
            segmenter_url: self.segmenter_url,
            api_token: self.api_token,
            http_timeout: Duration::from_secs(self.http_timeout),
            pipeline_config: self.pipeline_config,
            #[cfg(feature = "oar-ocr")]
            oar_ocr,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a title and description for a single image
    Describe {
        /// URL of the image to process
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Local file path of the image to process
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,

        /// Output format (json, pretty)
        #[arg(long, default_value = "pretty")]
        output: String,

        /// Timeout for downloading the image, in seconds
        #[arg(long = "download-timeout", default_value = "10", env = "PRODSCRIBE_DOWNLOAD_TIMEOUT")]
        download_timeout: u64,

        #[command(flatten)]
        collaborators: CollaboratorArgs,
    },
    /// Replace the background of a single image with white
    RemoveBackground {
        /// Local file path of the image to process
        #[arg(long)]
        file: PathBuf,

        /// Where to write the result; the format follows the extension
        #[arg(long)]
        output: PathBuf,

        #[command(flatten)]
        collaborators: CollaboratorArgs,
    },
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, short, default_value = "5000", env = "PRODSCRIBE_PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0", env = "PRODSCRIBE_HOST")]
        host: String,

        /// Timeout for downloading images, in seconds
        #[arg(long = "download-timeout", default_value = "10", env = "PRODSCRIBE_DOWNLOAD_TIMEOUT")]
        download_timeout: u64,

        #[command(flatten)]
        collaborators: CollaboratorArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    prodscribe::utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Describe {
            url,
            file,
            output,
            download_timeout,
            collaborators,
        } => {
            let config = collaborators.into_config();

            if let Some(url) = url {
                info!("Processing URL: {}", url);
                cli::describe_url(&url, &config, Duration::from_secs(download_timeout), &output)
                    .await?;
            } else if let Some(file) = file {
                info!("Processing file: {}", file.display());
                cli::describe_file(&file, &config, &output)?;
            } else {
                eprintln!("Error: Either --url or --file must be provided");
                std::process::exit(1);
            }
        }
        Commands::RemoveBackground {
            file,
            output,
            collaborators,
        } => {
            let config = collaborators.into_config();
            info!("Processing file: {}", file.display());
            cli::remove_background_file(&file, &output, &config)?;
        }
        Commands::Serve {
            port,
            host,
            download_timeout,
            collaborators,
        } => {
            let config = config::ServerConfig {
                engine: collaborators.into_config(),
                host,
                port,
                download_timeout: Duration::from_secs(download_timeout),
            };

            info!("Starting server on {}:{}", config.host, config.port);
            server::run_server(config).await?;
        }
    }

    Ok(())
}
