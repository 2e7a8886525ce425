use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    entities::document::CachedDocument,
    repositories::{
        document::{DocumentRepository, DocumentRepositoryError},
        document_cache::DocumentCacheRepository,
    },
};

/// Fetches documents straight from the catalog
#[derive(Clone)]
pub struct DocumentRepositoryImpl {
    client: reqwest::Client,
    timeout: Duration,
    cancel: CancellationToken,
}

impl DocumentRepositoryImpl {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// In-flight and future requests fail with `Cancelled` once `token` is cancelled
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self
        }
    }
}

#[async_trait]
impl DocumentRepository for DocumentRepositoryImpl {
    async fn fetch_document(&self, url: &str) -> Result<String, DocumentRepositoryError> {
        let request = async {
            let res = self.client.get(url).send().await?;
            let status = res.status();
            if !status.is_success() {
                return Err(DocumentRepositoryError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            Ok::<_, DocumentRepositoryError>(res.text().await?)
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DocumentRepositoryError::Cancelled(url.to_string())),
            res = tokio::time::timeout(self.timeout, request) => match res {
                Ok(res) => res,
                Err(_) => Err(DocumentRepositoryError::Timeout(url.to_string())),
            },
        }
    }
}

/// Serves documents from `cache` while they are younger than `ttl`.
///
/// Two callers missing on the same url at once both go to the network and the
/// later write wins.
#[derive(Clone)]
pub struct CachedDocumentRepository<R, C>
where
    R: DocumentRepository,
    C: DocumentCacheRepository,
{
    repo: R,
    cache: C,
    ttl: chrono::Duration,
}

impl<R, C> CachedDocumentRepository<R, C>
where
    R: DocumentRepository,
    C: DocumentCacheRepository,
{
    pub fn new(repo: R, cache: C, ttl: chrono::Duration) -> Self {
        Self { repo, cache, ttl }
    }
}

#[async_trait]
impl<R, C> DocumentRepository for CachedDocumentRepository<R, C>
where
    R: DocumentRepository,
    C: DocumentCacheRepository,
{
    async fn fetch_document(&self, url: &str) -> Result<String, DocumentRepositoryError> {
        match self.cache.get(url).await {
            Ok(Some(document)) if document.is_fresh(self.ttl, Utc::now()) => {
                trace!("cache hit {url}");
                return Ok(document.body);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("error read cache {url}: {e}");
            }
        }

        let body = self.repo.fetch_document(url).await?;
        debug!("fetched {url} ({} bytes)", body.len());

        if let Err(e) = self.cache.set(&CachedDocument::new(url, body.clone())).await {
            error!("error cache document {url}: {e}");
        }

        Ok(body)
    }
}
