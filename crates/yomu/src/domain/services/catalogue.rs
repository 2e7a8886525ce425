use std::{collections::HashSet, sync::Arc};

use thiserror::Error;
use yomu_lib::prelude::{ExtractError, Extractor, ExtractorInfo};

use crate::domain::{
    entities::{chapter::Chapter, manga::Manga},
    repositories::document::{DocumentRepository, DocumentRepositoryError},
};

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("fetch error: {0}")]
    FetchError(#[from] DocumentRepositoryError),
    #[error("parse error: {0}")]
    ParseError(#[from] ExtractError),
}

/// Catalog operations built from a document source and a markup strategy.
///
/// Nothing here is retried; with a fixed cache state every call returns the
/// same value.
#[derive(Clone)]
pub struct CatalogueService<R>
where
    R: DocumentRepository,
{
    repo: R,
    extractor: Arc<dyn Extractor>,
    base_url: String,
}

impl<R> CatalogueService<R>
where
    R: DocumentRepository,
{
    pub fn new(repo: R, extractor: Arc<dyn Extractor>, base_url: &str) -> Self {
        Self {
            repo,
            extractor,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn extractor_info(&self) -> ExtractorInfo {
        self.extractor.info()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Catalog paths are joined to the base url, absolute urls are kept
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if let Some(rest) = path.strip_prefix("//") {
            format!("https://{rest}")
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!("{}/search?word={}", self.base_url, urlencoding::encode(query))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Manga>, CatalogueError> {
        let html = self.repo.fetch_document(&self.search_url(query)).await?;

        // the same title can be linked from more than one thumbnail
        let mut seen = HashSet::new();
        let manga: Vec<Manga> = self
            .extractor
            .parse_search_results(&html)?
            .into_iter()
            .filter(|m| seen.insert(m.path.clone()))
            .map(Manga::from)
            .collect();

        debug!("search {query:?} found {} manga", manga.len());

        Ok(manga)
    }

    /// Chapters of a manga, oldest first
    pub async fn fetch_chapters(&self, manga_link: &str) -> Result<Vec<Chapter>, CatalogueError> {
        let html = self
            .repo
            .fetch_document(&self.absolute_url(manga_link))
            .await?;

        let mut chapters: Vec<Chapter> = self
            .extractor
            .parse_chapter_list(&html)?
            .into_iter()
            .map(Chapter::from)
            .collect();

        // the catalog lists the newest chapter first
        chapters.reverse();

        Ok(chapters)
    }

    pub async fn fetch_pages(&self, chapter_link: &str) -> Result<Vec<String>, CatalogueError> {
        let html = self
            .repo
            .fetch_document(&self.absolute_url(chapter_link))
            .await?;

        Ok(self.extractor.parse_page_images(&html)?)
    }

    pub async fn fetch_description(&self, manga_link: &str) -> Result<String, CatalogueError> {
        let html = self
            .repo
            .fetch_document(&self.absolute_url(manga_link))
            .await?;

        Ok(self.extractor.parse_description(&html)?)
    }

    /// Rebuilds a manga from its own page, used when only the link is stored
    pub async fn fetch_manga(&self, manga_link: &str) -> Result<Manga, CatalogueError> {
        let html = self
            .repo
            .fetch_document(&self.absolute_url(manga_link))
            .await?;

        let info = self
            .extractor
            .parse_search_results(&html)?
            .into_iter()
            .next()
            .ok_or(ExtractError::MissingElement("cover"))?;

        Ok(Manga {
            link: manga_link.to_string(),
            name: info.title,
            cover: info.cover_url,
        })
    }
}
