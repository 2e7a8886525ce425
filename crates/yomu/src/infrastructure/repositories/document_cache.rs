use std::{
    collections::HashMap,
    hash::Hasher,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use fnv::FnvHasher;
use tokio::sync::RwLock;

use crate::domain::{
    entities::document::CachedDocument,
    repositories::document_cache::{DocumentCacheRepository, DocumentCacheRepositoryError},
};

/// Cache file for `url` under `dir`, named after the url hash
pub(crate) fn hashed_file_path(dir: &Path, url: &str) -> PathBuf {
    let mut hasher = FnvHasher::default();
    hasher.write(url.as_bytes());

    dir.join(format!("{:016x}.bin", hasher.finish()))
}

/// Keeps documents for the life of the process. Entries older than `ttl` are
/// dropped when read and purged on every write.
#[derive(Clone)]
pub struct MemoryDocumentCache {
    documents: Arc<RwLock<HashMap<String, CachedDocument>>>,
    ttl: Duration,
}

impl MemoryDocumentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }
}

#[async_trait]
impl DocumentCacheRepository for MemoryDocumentCache {
    async fn get(&self, url: &str) -> Result<Option<CachedDocument>, DocumentCacheRepositoryError> {
        let mut documents = self.documents.write().await;
        match documents.get(url) {
            Some(document) if document.is_fresh(self.ttl, Utc::now()) => Ok(Some(document.clone())),
            Some(_) => {
                documents.remove(url);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, document: &CachedDocument) -> Result<(), DocumentCacheRepositoryError> {
        let now = Utc::now();
        let mut documents = self.documents.write().await;
        documents.retain(|_, cached| cached.is_fresh(self.ttl, now));
        documents.insert(document.url.clone(), document.clone());

        Ok(())
    }
}

/// One bincode file per url, named after the url hash
#[derive(Clone)]
pub struct FileDocumentCache {
    path: PathBuf,
}

impl FileDocumentCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: PathBuf::new().join(path),
        }
    }

    fn file_path(&self, url: &str) -> PathBuf {
        hashed_file_path(&self.path, url)
    }
}

#[async_trait]
impl DocumentCacheRepository for FileDocumentCache {
    async fn get(&self, url: &str) -> Result<Option<CachedDocument>, DocumentCacheRepositoryError> {
        let encoded = match tokio::fs::read(self.file_path(url)).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let (document, _): (CachedDocument, usize) =
            bincode::serde::decode_from_slice(&encoded, bincode::config::standard())?;

        // hash collision
        if document.url != url {
            return Ok(None);
        }

        Ok(Some(document))
    }

    async fn set(&self, document: &CachedDocument) -> Result<(), DocumentCacheRepositoryError> {
        let encoded = bincode::serde::encode_to_vec(document, bincode::config::standard())?;

        tokio::fs::create_dir_all(&self.path).await?;
        tokio::fs::write(self.file_path(&document.url), &encoded).await?;

        Ok(())
    }
}

/// Cache backend picked by configuration
#[derive(Clone)]
pub enum DocumentCacheRepositoryImpl {
    Memory(MemoryDocumentCache),
    File(FileDocumentCache),
}

#[async_trait]
impl DocumentCacheRepository for DocumentCacheRepositoryImpl {
    async fn get(&self, url: &str) -> Result<Option<CachedDocument>, DocumentCacheRepositoryError> {
        match self {
            Self::Memory(cache) => cache.get(url).await,
            Self::File(cache) => cache.get(url).await,
        }
    }

    async fn set(&self, document: &CachedDocument) -> Result<(), DocumentCacheRepositoryError> {
        match self {
            Self::Memory(cache) => cache.set(document).await,
            Self::File(cache) => cache.set(document).await,
        }
    }
}
