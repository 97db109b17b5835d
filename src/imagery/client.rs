use super::ImageryService;
use crate::mime::detect_image_mime;
use crate::models::{ClientConfig, ImageUploadResult, ImageUrlOptions, ServerError};
use crate::{urls, Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

pub struct ImageryClient {
    client: Client,
    config: ClientConfig,
}

impl ImageryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout.filter(|t| !t.is_zero()) {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_http_client(config, builder.build()?))
    }

    /// Use a caller-built transport, e.g. to share a connection pool or set
    /// proxy and timeout policy.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    fn construct_endpoint(&self, path: &str) -> String {
        urls::endpoint(&self.config.base_url, self.api_key(), path)
    }

    async fn read_part(path: &Path) -> Result<Part> {
        let contents = read_upload_file(path).await?;

        let mime = detect_image_mime(&contents);
        tracing::debug!(
            "Adding {} ({} bytes, {}) to upload",
            path.display(),
            contents.len(),
            mime
        );

        build_part(contents, upload_file_name(path), mime)
    }
}

/// Reads a whole file for upload. The handle is closed before returning.
pub(crate) async fn read_upload_file(path: &Path) -> Result<Vec<u8>> {
    let access = |source: std::io::Error| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(access)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents).await.map_err(access)?;
    Ok(contents)
}

fn build_part(contents: Vec<u8>, file_name: String, mime: &str) -> Result<Part> {
    Part::bytes(contents)
        .file_name(file_name.clone())
        .mime_str(mime)
        .map_err(|source| Error::Part { file_name, source })
}

/// Base name of `path`; the full path when it has none (e.g. `..`).
pub(crate) fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[async_trait]
impl ImageryService for ImageryClient {
    async fn upload_images(&self, paths: &[PathBuf]) -> Result<ImageUploadResult> {
        let mut form = Form::new();
        for path in paths {
            form = form.part("images", Self::read_part(path).await?);
        }

        let url = self.construct_endpoint(urls::UPLOAD_PATH);
        tracing::debug!("Uploading {} image(s) to {}", paths.len(), self.config.base_url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send upload request: {}", e);
                e
            })?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let error = ServerError::from_body(&body);
            tracing::error!("Image upload failed (status {}): {}", status, error);
            return Err(Error::Upload {
                status: status.as_u16(),
                error,
            });
        }

        let result: ImageUploadResult = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse upload response: {}\nBody: {}", e, body);
            Error::Decode(e)
        })?;

        tracing::info!("Uploaded {} image(s)", result.len());
        Ok(result)
    }

    fn image_url(&self, image_id: &str, options: Option<&ImageUrlOptions>) -> String {
        urls::image_url(&self.config.base_url, self.api_key(), image_id, options)
    }

    fn random_image_url(&self, options: Option<&ImageUrlOptions>) -> String {
        urls::random_image_url(&self.config.base_url, self.api_key(), options)
    }
}
