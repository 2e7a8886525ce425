use std::convert::TryFrom;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image types the renderer accepts
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported image type for {0}")]
pub struct InvalidMediaError(pub String);

/// A remote image url whose file extension has been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUri {
    url: String,
    extension: String,
}

impl TryFrom<&str> for ImageUri {
    type Error = InvalidMediaError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let filename = path.rsplit('/').next().unwrap_or_default();

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| InvalidMediaError(url.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            extension,
        })
    }
}

impl ImageUri {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_ext(&self.extension)
            .first_or_octet_stream()
            .to_string()
    }

    /// Attachment name a chat front-end can give the payload
    pub fn filename(&self) -> String {
        format!("image.{}", self.extension)
    }
}

#[derive(Debug, Clone)]
pub struct Image {
    pub content_type: String,
    pub data: Bytes,
}

/// Downloaded image bytes as stored by the image cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedImage {
    pub url: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedImage {
    pub fn new(url: &str, image: &Image) -> Self {
        Self {
            url: url.to_string(),
            content_type: image.content_type.clone(),
            data: image.data.to_vec(),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < ttl
    }
}

impl From<CachedImage> for Image {
    fn from(image: CachedImage) -> Self {
        Self {
            content_type: image.content_type,
            data: Bytes::from(image.data),
        }
    }
}

/// Image part of a render request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderImage {
    Url {
        url: String,
    },
    Bytes {
        filename: String,
        content_type: String,
        data: Vec<u8>,
    },
}
