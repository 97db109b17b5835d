//! Imagery service integration
//!
//! Uploads local image files to a Pixy Imagery server and builds retrieval
//! URLs for stored and random images.

pub mod client;
pub mod mock;

pub use client::ImageryClient;
pub use mock::MockImageryClient;

use crate::models::{ImageUploadResult, ImageUrlOptions};
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait ImageryService: Send + Sync {
    /// Uploads every file in one request. Fails without sending anything if a
    /// file cannot be read.
    async fn upload_images(&self, paths: &[PathBuf]) -> Result<ImageUploadResult>;

    fn image_url(&self, image_id: &str, options: Option<&ImageUrlOptions>) -> String;

    fn random_image_url(&self, options: Option<&ImageUrlOptions>) -> String;
}
