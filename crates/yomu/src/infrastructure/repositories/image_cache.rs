use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use super::document_cache::hashed_file_path;
use crate::domain::{
    entities::image::CachedImage,
    repositories::image_cache::{ImageCacheRepository, ImageCacheRepositoryError},
};

/// Keeps downloaded images for the life of the process, dropping entries older
/// than `ttl` the same way `MemoryDocumentCache` does
#[derive(Clone)]
pub struct MemoryImageCache {
    images: Arc<RwLock<HashMap<String, CachedImage>>>,
    ttl: Duration,
}

impl MemoryImageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            images: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }
}

#[async_trait]
impl ImageCacheRepository for MemoryImageCache {
    async fn get(&self, url: &str) -> Result<Option<CachedImage>, ImageCacheRepositoryError> {
        let mut images = self.images.write().await;
        match images.get(url) {
            Some(image) if image.is_fresh(self.ttl, Utc::now()) => Ok(Some(image.clone())),
            Some(_) => {
                images.remove(url);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, image: &CachedImage) -> Result<(), ImageCacheRepositoryError> {
        let now = Utc::now();
        let mut images = self.images.write().await;
        images.retain(|_, cached| cached.is_fresh(self.ttl, now));
        images.insert(image.url.clone(), image.clone());

        Ok(())
    }
}

#[derive(Clone)]
pub struct FileImageCache {
    path: PathBuf,
}

impl FileImageCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: PathBuf::new().join(path),
        }
    }
}

#[async_trait]
impl ImageCacheRepository for FileImageCache {
    async fn get(&self, url: &str) -> Result<Option<CachedImage>, ImageCacheRepositoryError> {
        let encoded = match tokio::fs::read(hashed_file_path(&self.path, url)).await {
            Ok(encoded) => encoded,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let (image, _): (CachedImage, usize) =
            bincode::serde::decode_from_slice(&encoded, bincode::config::standard())?;

        if image.url != url {
            return Ok(None);
        }

        Ok(Some(image))
    }

    async fn set(&self, image: &CachedImage) -> Result<(), ImageCacheRepositoryError> {
        let encoded = bincode::serde::encode_to_vec(image, bincode::config::standard())?;

        tokio::fs::create_dir_all(&self.path).await?;
        tokio::fs::write(hashed_file_path(&self.path, &image.url), &encoded).await?;

        Ok(())
    }
}

/// Image cache backend picked by configuration
#[derive(Clone)]
pub enum ImageCacheRepositoryImpl {
    Memory(MemoryImageCache),
    File(FileImageCache),
}

#[async_trait]
impl ImageCacheRepository for ImageCacheRepositoryImpl {
    async fn get(&self, url: &str) -> Result<Option<CachedImage>, ImageCacheRepositoryError> {
        match self {
            Self::Memory(cache) => cache.get(url).await,
            Self::File(cache) => cache.get(url).await,
        }
    }

    async fn set(&self, image: &CachedImage) -> Result<(), ImageCacheRepositoryError> {
        match self {
            Self::Memory(cache) => cache.set(image).await,
            Self::File(cache) => cache.set(image).await,
        }
    }
}
