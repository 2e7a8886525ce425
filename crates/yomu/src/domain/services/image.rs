use std::convert::TryFrom;

use thiserror::Error;

use crate::domain::{
    entities::image::{ImageUri, InvalidMediaError, RenderImage},
    repositories::image::{ImageRepository, ImageRepositoryError},
};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("invalid media: {0}")]
    InvalidMedia(#[from] InvalidMediaError),
    #[error("repository error: {0}")]
    RepositoryError(#[from] ImageRepositoryError),
}

#[derive(Clone)]
pub struct ImageService<R>
where
    R: ImageRepository,
{
    repo: R,
    inline: bool,
}

impl<R> ImageService<R>
where
    R: ImageRepository,
{
    /// With `inline` set, images are handed to the renderer as bytes instead of urls
    pub fn new(repo: R, inline: bool) -> Self {
        Self { repo, inline }
    }

    pub fn validate(&self, url: &str) -> Result<ImageUri, ImageError> {
        Ok(ImageUri::try_from(url)?)
    }

    pub async fn render_image(&self, url: &str) -> Result<RenderImage, ImageError> {
        let uri = self.validate(url)?;
        if !self.inline {
            return Ok(RenderImage::Url {
                url: uri.url().to_string(),
            });
        }

        let image = self.repo.fetch_image_from_url(&uri).await?;
        debug!("inlined {} ({} bytes)", uri.url(), image.data.len());

        Ok(RenderImage::Bytes {
            filename: uri.filename(),
            content_type: image.content_type,
            data: image.data.to_vec(),
        })
    }
}
