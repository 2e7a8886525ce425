use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::image::CachedImage;

#[derive(Debug, Error)]
pub enum ImageCacheRepositoryError {
    #[error("io error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("encode error: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),
    #[error("decode error: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),
}

#[async_trait]
pub trait ImageCacheRepository: Send + Sync {
    async fn get(&self, url: &str) -> Result<Option<CachedImage>, ImageCacheRepositoryError>;
    async fn set(&self, image: &CachedImage) -> Result<(), ImageCacheRepositoryError>;
}
