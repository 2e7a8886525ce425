use crate::{
    error::ExtractError,
    models::{ChapterInfo, ExtractorInfo, MangaInfo},
};

/// A markup strategy for one catalog layout.
///
/// Every method is a pure function of the document text. When the catalog
/// changes its markup a new implementation with a bumped version replaces the
/// old one; callers only ever see this trait.
pub trait Extractor: Send + Sync {
    fn info(&self) -> ExtractorInfo;

    /// Manga covers listed on a search page, in document order
    fn parse_search_results(&self, html: &str) -> Result<Vec<MangaInfo>, ExtractError>;

    /// Chapter links in the order the catalog lists them
    fn parse_chapter_list(&self, html: &str) -> Result<Vec<ChapterInfo>, ExtractError>;

    /// Page image urls of a chapter, in reading order
    fn parse_page_images(&self, html: &str) -> Result<Vec<String>, ExtractError>;

    fn parse_description(&self, html: &str) -> Result<String, ExtractError>;
}
