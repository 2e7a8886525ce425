use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentRepositoryError {
    #[error("error request document: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {0} timed out")]
    Timeout(String),
    #[error("request to {0} was cancelled")]
    Cancelled(String),
}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Returns the body of a successful GET to `url`
    async fn fetch_document(&self, url: &str) -> Result<String, DocumentRepositoryError>;
}
