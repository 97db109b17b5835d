//! Error handling and custom error types
//!
//! Provides unified error handling across the client using thiserror.

use crate::models::ServerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid upload part for {file_name}: {source}")]
    Part {
        file_name: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("image upload failed (status {status}): {error}")]
    Upload { status: u16, error: ServerError },

    #[error("failed to decode upload response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Server-reported message for an upload failure, empty for every other error.
    pub fn server_message(&self) -> &str {
        match self {
            Error::Upload { error, .. } => error.message(),
            _ => "",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
