//! Client SDK for the Pixy Imagery image-hosting service
//!
//! Uploads local image files in a single multipart request and builds
//! parameterized retrieval URLs for stored and random images.

pub mod error;
pub mod imagery;
pub mod mime;
pub mod models;
pub mod urls;

pub use error::{Error, Result};
pub use imagery::{ImageryClient, ImageryService, MockImageryClient};
pub use models::{ClientConfig, ImageUploadResult, ImageUrlOptions, ServerError, UploadedImage};
