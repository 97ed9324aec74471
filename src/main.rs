//! digit-canvas - handwritten digit drawing pad
//!
//! Draw digits on a fixed 800x160 canvas, send the drawing to a remote
//! recognition service and see the predicted digits with their boxes.

mod canvas;
mod config;
mod recognition;
mod storage;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::canvas::CanvasController;
use crate::config::AppConfig;
use crate::recognition::client::RequestEncoding;
use crate::recognition::{HttpRecognizer, RequestDispatcher};

/// Handwritten digit drawing pad
#[derive(Parser, Debug)]
#[command(name = "digit-canvas")]
#[command(about = "Draw digits and have a remote service recognize them")]
struct Args {
    /// Base URL of the recognition service (overrides config and environment)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request body encoding
    #[arg(long, value_enum)]
    encoding: Option<RequestEncoding>,

    /// Path to config.toml (defaults to the per-user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recognize a PNG file without opening the window
    #[arg(long, value_name = "PNG")]
    recognize: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => storage::default_config_path()?,
    };
    let config = effective_config(&args, &config_path);

    if args.write_config {
        config::save_config(&config, &config_path)?;
        println!("Wrote configuration to {}", config_path.display());
        return Ok(());
    }

    let recognizer = HttpRecognizer::new(&config.recognition)
        .context("Failed to create HTTP client")?;
    info!(
        "Recognition endpoint: {} ({:?})",
        recognizer.endpoint(),
        recognizer.encoding()
    );

    if let Some(path) = &args.recognize {
        return recognize_file(path, &recognizer, &config);
    }

    let dispatcher = RequestDispatcher::new(Arc::new(recognizer))?;
    ui::run_app(config, dispatcher).map_err(|e| anyhow::anyhow!("Window error: {e}"))?;

    info!("digit-canvas shutdown complete");
    Ok(())
}

/// Config file, then environment, then command line
fn effective_config(args: &Args, config_path: &Path) -> AppConfig {
    let mut config = config::load_or_default(config_path);
    config.apply_env();
    if let Some(endpoint) = &args.endpoint {
        config.recognition.base_url = endpoint.clone();
    }
    if let Some(encoding) = args.encoding {
        config.recognition.encoding = encoding;
    }
    config
}

/// Headless mode: load `path` into a canvas, recognize it, print the result
fn recognize_file(path: &Path, recognizer: &HttpRecognizer, config: &AppConfig) -> Result<()> {
    let image = image::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let mut controller = CanvasController::with_pen_width(config.canvas.effective_pen_width());
    controller.load_image(&image);

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let prediction = runtime
        .block_on(controller.recognize(recognizer))
        .with_context(|| format!("Recognition of {} failed", path.display()))?;

    println!("Predicted: {}", prediction.predicted);
    if let Some(summary) = prediction.per_digit_summary() {
        println!("Per digit: {}", summary);
    }
    for (i, b) in prediction.boxes.iter().enumerate() {
        println!(
            "Box #{}: ({}, {}) - ({}, {})",
            i + 1,
            b.x1,
            b.y1,
            b.x2,
            b.y2
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "digit-canvas",
            "--endpoint",
            "http://cli:1",
            "--encoding",
            "json",
        ]);
        let config = effective_config(&args, Path::new("/nonexistent/config.toml"));
        assert_eq!(config.recognition.base_url, "http://cli:1");
        assert_eq!(config.recognition.encoding, RequestEncoding::Json);
    }

    #[test]
    fn test_cli_defaults_leave_config_alone() {
        let args = Args::parse_from(["digit-canvas"]);
        assert!(args.recognize.is_none());
        assert!(!args.write_config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut saved = AppConfig::default();
        saved.recognition.encoding = RequestEncoding::Json;
        config::save_config(&saved, &path).unwrap();

        let config = effective_config(&args, &path);
        assert_eq!(config.recognition.encoding, RequestEncoding::Json);
    }

    #[test]
    fn test_recognize_file_against_stub_server() {
        use crate::recognition::client::tests::{find, serve_once, TWENTY_THREE};

        let server_rt = tokio::runtime::Runtime::new().unwrap();
        let (base_url, server) = server_rt.block_on(serve_once("200 OK", TWENTY_THREE));

        let dir = tempfile::tempdir().unwrap();
        let png_path = dir.path().join("digits.png");
        image::RgbaImage::from_pixel(400, 80, image::Rgba([0, 0, 0, 255]))
            .save(&png_path)
            .unwrap();

        let mut config = AppConfig::default();
        config.recognition.base_url = base_url;
        let recognizer = HttpRecognizer::new(&config.recognition).unwrap();
        recognize_file(&png_path, &recognizer, &config).unwrap();

        let request = server_rt.block_on(server).unwrap();
        assert!(find(&request, b"drawing.png").is_some());
    }

    #[test]
    fn test_recognize_missing_file_fails() {
        let config = AppConfig::default();
        let recognizer = HttpRecognizer::new(&config.recognition).unwrap();
        let err = recognize_file(Path::new("/nonexistent/digits.png"), &recognizer, &config)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }
}
