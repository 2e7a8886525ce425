use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::document::CachedDocument;

#[derive(Debug, Error)]
pub enum DocumentCacheRepositoryError {
    #[error("io error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("encode error: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),
    #[error("decode error: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),
}

#[async_trait]
pub trait DocumentCacheRepository: Send + Sync {
    /// Stored entry for exactly this url, fresh or not
    async fn get(&self, url: &str) -> Result<Option<CachedDocument>, DocumentCacheRepositoryError>;

    /// Replaces any entry stored for `document.url`
    async fn set(&self, document: &CachedDocument) -> Result<(), DocumentCacheRepositoryError>;
}
