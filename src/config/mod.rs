//! Application Configuration
//!
//! User settings stored in TOML format, with environment and CLI overrides
//! applied on top.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::canvas::{clamp_pen_width, DEFAULT_PEN_WIDTH};
use crate::recognition::client::RequestEncoding;

/// Environment variable overriding the recognition base URL
pub const API_URL_ENV: &str = "DIGIT_CANVAS_API_URL";

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Recognition service settings
    pub recognition: RecognitionSettings,
    /// Drawing settings
    pub canvas: CanvasSettings,
    /// Main window settings
    pub window: WindowSettings,
}

/// Where and how drawings are sent for recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Base URL of the service; `/predict` is appended
    pub base_url: String,
    /// Request body format
    pub encoding: RequestEncoding,
    /// Optional request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            encoding: RequestEncoding::Multipart,
            timeout_secs: None,
        }
    }
}

/// Drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Initial pen width, clamped to the supported range on use
    pub pen_width: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            pen_width: DEFAULT_PEN_WIDTH,
        }
    }
}

impl CanvasSettings {
    pub fn effective_pen_width(&self) -> f32 {
        if self.pen_width.is_nan() {
            DEFAULT_PEN_WIDTH
        } else {
            clamp_pen_width(self.pen_width)
        }
    }
}

/// Main window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 520.0,
        }
    }
}

impl AppConfig {
    /// Apply `DIGIT_CANVAS_API_URL` if it is set and non-empty
    pub fn apply_env(&mut self) {
        self.apply_api_url(std::env::var(API_URL_ENV).ok());
    }

    fn apply_api_url(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            info!("Using recognition endpoint from {}: {}", API_URL_ENV, url);
            self.recognition.base_url = url.trim().to_string();
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Load configuration, falling back to defaults when the file is missing or
/// unreadable
pub fn load_or_default(path: &Path) -> AppConfig {
    if !path.exists() {
        info!("No configuration at {:?}, using defaults", path);
        return AppConfig::default();
    }
    match load_config(path) {
        Ok(config) => {
            info!("Loaded configuration from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring configuration: {:#}", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        assert_eq!(config.recognition.base_url, "http://localhost:8000");
        assert_eq!(config.recognition.encoding, RequestEncoding::Multipart);
        assert!(config.recognition.timeout_secs.is_none());

        assert!((config.canvas.pen_width - 18.0).abs() < f32::EPSILON);

        assert!((config.window.width - 900.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.recognition.encoding = RequestEncoding::Json;
        config.recognition.timeout_secs = Some(30);
        config.canvas.pen_width = 24.0;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("encoding = \"json\""));

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [recognition]
            base_url = "http://digits.local:9000"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.recognition.base_url, "http://digits.local:9000");
        assert_eq!(parsed.recognition.encoding, RequestEncoding::Multipart);
        assert_eq!(parsed.canvas, CanvasSettings::default());
    }

    #[test]
    fn test_effective_pen_width_clamps() {
        let mut canvas = CanvasSettings { pen_width: 100.0 };
        assert_eq!(canvas.effective_pen_width(), 36.0);
        canvas.pen_width = 1.0;
        assert_eq!(canvas.effective_pen_width(), 6.0);
        canvas.pen_width = f32::NAN;
        assert_eq!(canvas.effective_pen_width(), 18.0);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.recognition.base_url = "http://10.0.0.2:8000".to_string();

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
        let config = load_or_default(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        assert!(load_config(temp_file.path()).is_err());
        assert_eq!(load_or_default(temp_file.path()), AppConfig::default());
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let result = toml::from_str::<AppConfig>("[recognition]\nencoding = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_api_url_override() {
        let mut config = AppConfig::default();
        config.apply_api_url(Some("  http://override:1234 ".to_string()));
        assert_eq!(config.recognition.base_url, "http://override:1234");

        config.apply_api_url(Some("   ".to_string()));
        assert_eq!(config.recognition.base_url, "http://override:1234");
        config.apply_api_url(None);
        assert_eq!(config.recognition.base_url, "http://override:1234");
    }
}
