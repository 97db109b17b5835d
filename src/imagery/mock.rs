use super::client::{read_upload_file, upload_file_name};
use super::ImageryService;
use crate::models::{
    ClientConfig, ImageUploadResult, ImageUrlOptions, ServerError, UploadedImage,
};
use crate::{urls, Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct MockImageryClient {
    config: ClientConfig,
    uploaded_names: Arc<Mutex<Vec<String>>>,
    upload_count: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
}

impl MockImageryClient {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            uploaded_names: Arc::new(Mutex::new(Vec::new())),
            upload_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Make every upload fail as if the server answered `status` with `{"error": message}`.
    pub fn with_upload_error(self, status: u16, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some((status, message.to_string()));
        self
    }

    pub fn get_upload_count(&self) -> usize {
        *self.upload_count.lock().unwrap()
    }

    pub fn get_uploaded_names(&self) -> Vec<String> {
        self.uploaded_names.lock().unwrap().clone()
    }
}

impl Default for MockImageryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageryService for MockImageryClient {
    async fn upload_images(&self, paths: &[PathBuf]) -> Result<ImageUploadResult> {
        for path in paths {
            read_upload_file(path).await?;
        }

        *self.upload_count.lock().unwrap() += 1;

        if let Some((status, message)) = self.failure.lock().unwrap().clone() {
            return Err(Error::Upload {
                status,
                error: ServerError::Reported(message),
            });
        }

        let mut names = self.uploaded_names.lock().unwrap();
        let images = paths
            .iter()
            .map(|path| {
                names.push(upload_file_name(path));
                let image_id = Uuid::new_v4().to_string();
                UploadedImage {
                    url: format!("{}/{}", self.config.base_url, image_id),
                    image_id,
                }
            })
            .collect();

        Ok(ImageUploadResult { images })
    }

    fn image_url(&self, image_id: &str, options: Option<&ImageUrlOptions>) -> String {
        urls::image_url(
            &self.config.base_url,
            self.config.api_key.as_deref(),
            image_id,
            options,
        )
    }

    fn random_image_url(&self, options: Option<&ImageUrlOptions>) -> String {
        urls::random_image_url(&self.config.base_url, self.config.api_key.as_deref(), options)
    }
}
