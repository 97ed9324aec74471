//! Recognition Service Layer
//!
//! Wire types for the `/predict` endpoint, the error type shown to the user,
//! and the async seam the canvas controller talks to.

pub mod client;
pub mod dispatcher;

pub use client::HttpRecognizer;
pub use dispatcher::{RecognitionOutcome, RequestDispatcher};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Anything that can turn a PNG of the drawing into a prediction
#[async_trait]
pub trait RecognitionService: Send + Sync {
    async fn predict(&self, png: Vec<u8>) -> Result<Prediction, RecognitionError>;
}

/// Errors from a single recognition attempt
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-2xx status
    #[error("server returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// 2xx response whose body is not a prediction
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The drawing could not be encoded
    #[error("could not encode drawing: {0}")]
    Encode(#[from] image::ImageError),
}

/// Axis-aligned box `(x1, y1, x2, y2)` in drawing-surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Normalised integer edges `(left, top, right, bottom)`
    pub fn pixel_edges(&self) -> (i32, i32, i32, i32) {
        (
            self.x1.min(self.x2).round() as i32,
            self.y1.min(self.y2).round() as i32,
            self.x1.max(self.x2).round() as i32,
            self.y1.max(self.y2).round() as i32,
        )
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Confidence for one recognised digit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitScore {
    pub digit: u32,
    pub prob: f32,
}

/// Successful `/predict` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Recognised digits, left to right
    pub predicted: String,
    #[serde(default)]
    pub boxes: Vec<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_digit: Option<Vec<DigitScore>>,
}

impl Prediction {
    /// `#1:2 (97.3%)  #2:3 (88.0%)`, or `None` without per-digit scores
    pub fn per_digit_summary(&self) -> Option<String> {
        let scores = self.per_digit.as_ref()?;
        Some(
            scores
                .iter()
                .enumerate()
                .map(|(i, s)| format!("#{}:{} ({:.1}%)", i + 1, s.digit, s.prob * 100.0))
                .collect::<Vec<_>>()
                .join("  "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{
            "predicted": "23",
            "boxes": [[10, 20, 30, 60], [40, 20, 60, 60]],
            "per_digit": [{"digit": 2, "prob": 0.973}, {"digit": 3, "prob": 0.88}]
        }"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();

        assert_eq!(prediction.predicted, "23");
        assert_eq!(
            prediction.boxes,
            vec![
                BoundingBox::new(10.0, 20.0, 30.0, 60.0),
                BoundingBox::new(40.0, 20.0, 60.0, 60.0),
            ]
        );
        assert_eq!(
            prediction.per_digit_summary().as_deref(),
            Some("#1:2 (97.3%)  #2:3 (88.0%)")
        );
    }

    #[test]
    fn test_parse_without_per_digit() {
        let json = r#"{"predicted": "7", "boxes": [[1.5, 2, 3, 4]]}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert!(prediction.per_digit.is_none());
        assert!(prediction.per_digit_summary().is_none());
        assert_eq!(prediction.boxes[0].x1, 1.5);
    }

    #[test]
    fn test_parse_rejects_malformed_box() {
        let json = r#"{"predicted": "7", "boxes": [[1, 2, 3]]}"#;
        assert!(serde_json::from_str::<Prediction>(json).is_err());
    }

    #[test]
    fn test_pixel_edges_normalise_reversed_corners() {
        let b = BoundingBox::new(60.4, 60.0, 40.0, 39.6);
        assert_eq!(b.pixel_edges(), (40, 40, 60, 60));
    }

    #[test]
    fn test_status_error_message_carries_body() {
        let err = RecognitionError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "No digits found".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 400 Bad Request: No digits found");
    }
}
