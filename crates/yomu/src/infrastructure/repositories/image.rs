use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::REFERER;
use tokio_util::sync::CancellationToken;

use crate::domain::{
    entities::image::{CachedImage, Image, ImageUri},
    repositories::{
        image::{ImageRepository, ImageRepositoryError},
        image_cache::ImageCacheRepository,
    },
};

#[derive(Clone)]
pub struct ImageRepositoryImpl {
    client: reqwest::Client,
    referer: String,
    timeout: Duration,
    cancel: CancellationToken,
}

impl ImageRepositoryImpl {
    pub fn new(client: reqwest::Client, referer: &str, timeout: Duration) -> Self {
        Self {
            client,
            referer: referer.to_string(),
            timeout,
            cancel: CancellationToken::new(),
        }
    }

    /// In-flight and future downloads fail with `Cancelled` once `token` is cancelled
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self
        }
    }
}

#[async_trait]
impl ImageRepository for ImageRepositoryImpl {
    async fn fetch_image_from_url(&self, uri: &ImageUri) -> Result<Image, ImageRepositoryError> {
        let url = uri.url();
        let request = async {
            let res = self
                .client
                .get(url)
                .header(REFERER, &self.referer)
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                return Err(ImageRepositoryError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            Ok::<_, ImageRepositoryError>(res.bytes().await?)
        };

        let data = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                return Err(ImageRepositoryError::Cancelled(url.to_string()));
            }
            res = tokio::time::timeout(self.timeout, request) => match res {
                Ok(res) => res?,
                Err(_) => return Err(ImageRepositoryError::Timeout(url.to_string())),
            },
        };

        Ok(Image {
            content_type: uri.content_type(),
            data,
        })
    }
}

/// Serves images from `cache` while they are younger than `ttl`
#[derive(Clone)]
pub struct CachedImageRepository<R, C>
where
    R: ImageRepository,
    C: ImageCacheRepository,
{
    repo: R,
    cache: C,
    ttl: chrono::Duration,
}

impl<R, C> CachedImageRepository<R, C>
where
    R: ImageRepository,
    C: ImageCacheRepository,
{
    pub fn new(repo: R, cache: C, ttl: chrono::Duration) -> Self {
        Self { repo, cache, ttl }
    }
}

#[async_trait]
impl<R, C> ImageRepository for CachedImageRepository<R, C>
where
    R: ImageRepository,
    C: ImageCacheRepository,
{
    async fn fetch_image_from_url(&self, uri: &ImageUri) -> Result<Image, ImageRepositoryError> {
        let url = uri.url();
        match self.cache.get(url).await {
            Ok(Some(image)) if image.is_fresh(self.ttl, Utc::now()) => {
                trace!("image cache hit {url}");
                return Ok(image.into());
            }
            Ok(_) => {}
            Err(e) => {
                warn!("error read image cache {url}: {e}");
            }
        }

        let image = self.repo.fetch_image_from_url(uri).await?;

        if let Err(e) = self.cache.set(&CachedImage::new(url, &image)).await {
            error!("error cache image {url}: {e}");
        }

        Ok(image)
    }
}
