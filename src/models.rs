//! Data models and structures
//!
//! Defines the client configuration, the retrieval options, and the wire
//! shapes exchanged with the imagery service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5100";

/// One stored image as reported by the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedImage {
    pub image_id: String,
    pub url: String,
}

/// Successful upload response, in the order the server returned the images.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImageUploadResult {
    pub images: Vec<UploadedImage>,
}

impl ImageUploadResult {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|i| i.image_id.as_str())
    }
}

/// Resize hints for the retrieval endpoints. Zero and `None` are both "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageUrlOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub maintain_aspect_ratio: bool,
}

impl ImageUrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn maintain_aspect_ratio(mut self, maintain: bool) -> Self {
        self.maintain_aspect_ratio = maintain;
        self
    }

    /// Query parameters in declared order: `w`, `h`, `maintain_aspect_ratio`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(w) = self.width.filter(|w| *w > 0) {
            pairs.push(("w", w.to_string()));
        }
        if let Some(h) = self.height.filter(|h| *h > 0) {
            pairs.push(("h", h.to_string()));
        }
        if self.maintain_aspect_ratio {
            pairs.push(("maintain_aspect_ratio", "true".to_string()));
        }
        pairs
    }
}

/// Failure body returned by the service on non-200 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Outcome of decoding a failure response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerError {
    /// The body was `{"error": "..."}`.
    Reported(String),
    /// The body was not JSON or had no string `error` field.
    Unreported { body: String },
}

impl ServerError {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => ServerError::Reported(parsed.error),
            Err(_) => ServerError::Unreported {
                body: body.to_string(),
            },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServerError::Reported(message) => message,
            ServerError::Unreported { .. } => "",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Reported(message) => f.write_str(message),
            ServerError::Unreported { body } if body.is_empty() => {
                f.write_str("no error message in response")
            }
            ServerError::Unreported { body } => {
                write!(f, "no error message in response body: {}", body)
            }
        }
    }
}

// Configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// An empty `base_url` falls back to [`DEFAULT_BASE_URL`]; an empty key means no key.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: if base_url.is_empty() {
                DEFAULT_BASE_URL.to_string()
            } else {
                base_url
            },
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout: None,
        }
    }

    /// A zero timeout means no timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout).filter(|t| !t.is_zero());
        self
    }

    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::new(
            std::env::var("PIXY_BASE_URL").unwrap_or_default(),
            std::env::var("PIXY_API_KEY").ok(),
        );

        match std::env::var("PIXY_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!(
                        "PIXY_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }
}
