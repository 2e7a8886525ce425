use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::image::{Image, ImageUri};

#[derive(Debug, Error)]
pub enum ImageRepositoryError {
    #[error("error request image: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("timed out fetching {0}")]
    Timeout(String),
    #[error("cancelled fetching {0}")]
    Cancelled(String),
}

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn fetch_image_from_url(&self, uri: &ImageUri) -> Result<Image, ImageRepositoryError>;
}
