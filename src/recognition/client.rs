//! HTTP client for the `/predict` endpoint

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{Prediction, RecognitionError, RecognitionService};
use crate::config::RecognitionSettings;

/// How the PNG is carried in the request body
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RequestEncoding {
    /// `multipart/form-data` with a single `image` file field
    #[default]
    Multipart,
    /// JSON `{"image": "data:image/png;base64,..."}`
    Json,
}

#[derive(Serialize)]
struct JsonRequest {
    image: String,
}

/// Talks to a recognition server over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecognizer {
    client: reqwest::Client,
    endpoint: String,
    encoding: RequestEncoding,
}

impl HttpRecognizer {
    /// Build a client from settings. No timeout unless one is configured.
    pub fn new(settings: &RecognitionSettings) -> Result<Self, RecognitionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: predict_url(&settings.base_url),
            encoding: settings.encoding,
        })
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn encoding(&self) -> RequestEncoding {
        self.encoding
    }
}

#[async_trait]
impl RecognitionService for HttpRecognizer {
    async fn predict(&self, png: Vec<u8>) -> Result<Prediction, RecognitionError> {
        debug!(
            "POST {} ({:?}, {} byte image)",
            self.endpoint,
            self.encoding,
            png.len()
        );

        let request = match self.encoding {
            RequestEncoding::Multipart => {
                let part = Part::bytes(png)
                    .file_name("drawing.png")
                    .mime_str("image/png")?;
                self.client
                    .post(&self.endpoint)
                    .multipart(Form::new().part("image", part))
            }
            RequestEncoding::Json => self.client.post(&self.endpoint).json(&JsonRequest {
                image: png_data_url(&png),
            }),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RecognitionError::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn predict_url(base_url: &str) -> String {
    format!("{}/predict", base_url.trim_end_matches('/'))
}

fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}
