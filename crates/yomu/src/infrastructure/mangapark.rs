use std::sync::Arc;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use yomu_lib::prelude::{ChapterInfo, ExtractError, Extractor, ExtractorInfo, MangaInfo, Version};

pub const BASE_URL: &str = "https://mangapark.com";

fn selector(selector: &str) -> Selector {
    Selector::parse(selector).expect("selector should be valid")
}

static THUMBNAIL: Lazy<Selector> = Lazy::new(|| selector(r#"img[src*="thumb"]"#));
static CHAPTER_LIST: Lazy<Selector> = Lazy::new(|| selector(r#"[data-name="chapter-list"]"#));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static IMAGE_ITEM: Lazy<Selector> = Lazy::new(|| selector(r#"[data-name="image-item"]"#));
static IMAGE: Lazy<Selector> = Lazy::new(|| selector("img"));
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector("div.limit-html-p"));

/// Markup of mangapark.com as of mid 2025
#[derive(Debug, Clone, Copy, Default)]
pub struct MangaparkV1;

impl MangaparkV1 {
    pub const VERSION: Version = Version::new(1, 0, 0);
}

/// Every extractor yomu ships, newest markup first
pub fn extractors() -> Vec<Arc<dyn Extractor>> {
    vec![Arc::new(MangaparkV1)]
}

/// Extractor able to read markup captured for `version`
pub fn extractor_for(version: &Version) -> Option<Arc<dyn Extractor>> {
    extractors()
        .into_iter()
        .find(|extractor| extractor.info().version.is_compatible(version))
}

fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl Extractor for MangaparkV1 {
    fn info(&self) -> ExtractorInfo {
        ExtractorInfo {
            name: "mangapark".to_string(),
            version: Self::VERSION,
        }
    }

    fn parse_search_results(&self, html: &str) -> Result<Vec<MangaInfo>, ExtractError> {
        let document = Html::parse_document(html);

        let manga = document
            .select(&THUMBNAIL)
            .filter_map(|img| {
                let cover_url = img.value().attr("src")?;
                let title = img.value().attr("title")?.trim();
                let path = img
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|el| el.value().name() == "a")?
                    .value()
                    .attr("href")?;

                Some(MangaInfo {
                    path: path.to_string(),
                    title: title.to_string(),
                    cover_url: cover_url.to_string(),
                })
            })
            .collect();

        Ok(manga)
    }

    fn parse_chapter_list(&self, html: &str) -> Result<Vec<ChapterInfo>, ExtractError> {
        let document = Html::parse_document(html);

        let list = document
            .select(&CHAPTER_LIST)
            .next()
            .ok_or(ExtractError::MissingElement("chapter-list"))?;

        let chapters = list
            .select(&LINK)
            .filter_map(|a| {
                Some(ChapterInfo {
                    path: a.value().attr("href")?.to_string(),
                    title: text_of(a),
                })
            })
            .collect();

        Ok(chapters)
    }

    fn parse_page_images(&self, html: &str) -> Result<Vec<String>, ExtractError> {
        let document = Html::parse_document(html);

        let items: Vec<ElementRef> = document.select(&IMAGE_ITEM).collect();
        if items.is_empty() {
            return Err(ExtractError::MissingElement("image-item"));
        }

        items
            .into_iter()
            .map(|item| {
                let img = item
                    .select(&IMAGE)
                    .next()
                    .ok_or(ExtractError::MissingElement("img"))?;

                img.value()
                    .attr("src")
                    .map(str::to_string)
                    .ok_or(ExtractError::MissingAttribute {
                        element: "img",
                        attribute: "src",
                    })
            })
            .collect()
    }

    fn parse_description(&self, html: &str) -> Result<String, ExtractError> {
        let document = Html::parse_document(html);

        let description = document
            .select(&DESCRIPTION)
            .next()
            .ok_or(ExtractError::MissingElement("limit-html-p"))?;

        Ok(description.text().collect::<String>().trim().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SEARCH: &str = include_str!("../../../../test/data/mangapark/search.html");
    const TITLE: &str = include_str!("../../../../test/data/mangapark/title.html");
    const CHAPTER: &str = include_str!("../../../../test/data/mangapark/chapter.html");
    const DRIFTED: &str = include_str!("../../../../test/data/mangapark/drifted.html");

    #[test]
    fn test_extractor_for_version() {
        let extractor = extractor_for(&"1.3.0".parse().unwrap()).unwrap();
        assert_eq!(extractor.info().to_string(), "mangapark v1.0.0");

        assert!(extractor_for(&Version::new(2, 0, 0)).is_none());
    }

    #[test]
    fn test_parse_search_results() {
        let manga = MangaparkV1.parse_search_results(SEARCH).unwrap();

        assert_eq!(manga.len(), 4);
        assert_eq!(
            manga[0],
            MangaInfo {
                path: "/title/10380-en-kaguya-sama-love-is-war".to_string(),
                title: "Kaguya-sama: Love is War".to_string(),
                cover_url: "/thumb/W600/ampi/5b1/kaguya.jpg".to_string(),
            }
        );
        assert_eq!(manga[1].title, "Kaguya-sama wa Kokurasetai: Doujin");
        assert_eq!(manga[2].path, "/title/121453-en-we-want-to-talk-about-kaguya");
        // sidebar repeats the first result, dedup happens in the catalogue
        assert_eq!(manga[3].path, manga[0].path);
        assert!(manga.iter().all(|m| m.cover_url.contains("thumb")));
    }

    #[test]
    fn test_parse_search_results_empty() {
        let manga = MangaparkV1.parse_search_results(DRIFTED).unwrap();

        assert!(manga.is_empty());
    }

    #[test]
    fn test_parse_chapter_list() {
        let chapters = MangaparkV1.parse_chapter_list(TITLE).unwrap();

        assert_eq!(chapters.len(), 4);
        assert_eq!(
            chapters[0],
            ChapterInfo {
                path: "/title/10380-en-kaguya-sama-love-is-war/9004-ch-281".to_string(),
                title: "Ch.281 Miyuki Shirogane Wants to Confess".to_string(),
            }
        );
        assert_eq!(chapters[3].title, "Ch.1 I Will Make You Invite Me to a Movie");
    }

    #[test]
    fn test_parse_page_images() {
        let pages = MangaparkV1.parse_page_images(CHAPTER).unwrap();

        assert_eq!(
            pages,
            vec![
                "https://s07.mpfip.org/media/mpup/0a2/001.jpg".to_string(),
                "https://s07.mpfip.org/media/mpup/0a2/002.jpg".to_string(),
                "https://s07.mpfip.org/media/mpup/0a2/003.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_description() {
        let description = MangaparkV1.parse_description(TITLE).unwrap();

        assert!(description.starts_with("All's fair in love and war"));
        assert!(description.ends_with("confess first!"));
    }

    #[test]
    fn test_missing_containers_are_errors() {
        assert_eq!(
            MangaparkV1.parse_chapter_list(DRIFTED),
            Err(ExtractError::MissingElement("chapter-list"))
        );
        assert_eq!(
            MangaparkV1.parse_page_images(DRIFTED),
            Err(ExtractError::MissingElement("image-item"))
        );
        assert_eq!(
            MangaparkV1.parse_description(DRIFTED),
            Err(ExtractError::MissingElement("limit-html-p"))
        );
    }

    #[test]
    fn test_image_item_without_image() {
        let html = r#"<div data-name="image-item"><span>loading</span></div>"#;

        assert_eq!(
            MangaparkV1.parse_page_images(html),
            Err(ExtractError::MissingElement("img"))
        );
    }

    #[test]
    fn test_empty_chapter_list() {
        let html = r#"<div data-name="chapter-list"></div>"#;

        assert_eq!(MangaparkV1.parse_chapter_list(html), Ok(vec![]));
    }
}
