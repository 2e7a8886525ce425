#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use bytes::Bytes;
use yomu::{
    application::navigation::Navigator,
    domain::{
        entities::{
            bookmark::Bookmark,
            image::{Image, ImageUri},
        },
        repositories::{
            bookmark::{BookmarkRepository, BookmarkRepositoryError},
            document::{DocumentRepository, DocumentRepositoryError},
            image::{ImageRepository, ImageRepositoryError},
        },
        services::{bookmark::BookmarkService, catalogue::CatalogueService, image::ImageService},
    },
    infrastructure::mangapark::MangaparkV1,
};

pub const BASE_URL: &str = "https://mangapark.test";
pub const KAGUYA: &str = "/title/1-kaguya-sama-love-is-war";
pub const KAGUYA_CHAPTERS: usize = 30;
pub const PAGES_PER_CHAPTER: usize = 3;

/// Serves canned pages by exact url and records every request
#[derive(Clone, Default)]
pub struct FakeCatalog {
    documents: Arc<Mutex<HashMap<String, String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub fn insert(&self, url: &str, body: String) {
        self.documents.lock().unwrap().insert(url.to_string(), body);
    }

    pub fn remove(&self, url: &str) {
        self.documents.lock().unwrap().remove(url);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

#[async_trait]
impl DocumentRepository for FakeCatalog {
    async fn fetch_document(&self, url: &str) -> Result<String, DocumentRepositoryError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| DocumentRepositoryError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[derive(Clone, Default)]
pub struct FakeBookmarks {
    bookmarks: Arc<Mutex<Vec<Bookmark>>>,
}

impl FakeBookmarks {
    pub fn all(&self) -> Vec<Bookmark> {
        self.bookmarks.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookmarkRepository for FakeBookmarks {
    async fn insert_user_if_absent(&self, _user_id: i64) -> Result<(), BookmarkRepositoryError> {
        Ok(())
    }

    async fn upsert_bookmark(
        &self,
        user_id: i64,
        manga_link: &str,
        chapter: usize,
    ) -> Result<(), BookmarkRepositoryError> {
        let mut bookmarks = self.bookmarks.lock().unwrap();
        match bookmarks
            .iter_mut()
            .find(|b| b.user_id == user_id && b.manga_link == manga_link)
        {
            Some(bookmark) => bookmark.chapter = chapter,
            None => bookmarks.push(Bookmark {
                user_id,
                manga_link: manga_link.to_string(),
                chapter,
            }),
        }
        Ok(())
    }

    async fn get_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, BookmarkRepositoryError> {
        Ok(self
            .bookmarks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub struct FakeImages {
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeImages {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageRepository for FakeImages {
    async fn fetch_image_from_url(&self, uri: &ImageUri) -> Result<Image, ImageRepositoryError> {
        self.requests.lock().unwrap().push(uri.url().to_string());
        Ok(Image {
            content_type: uri.content_type(),
            data: Bytes::from_static(b"\x89PNG"),
        })
    }
}

pub fn search_page(entries: &[(String, String, String)]) -> String {
    let items: String = entries
        .iter()
        .map(|(link, name, cover)| {
            format!(
                r#"<div class="flex"><a href="{link}"><img src="{cover}" title="{name}"></a></div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div data-name="search-results">{items}</div></body></html>"#)
}

pub fn chapter_link(manga: &str, number: usize) -> String {
    format!("{manga}/c{number}")
}

/// Title page listing `chapters` chapters newest first, like the catalog does
pub fn title_page(manga: &str, name: &str, chapters: usize) -> String {
    let links: String = (1..=chapters)
        .rev()
        .map(|n| format!(r#"<div><a href="{}">Chapter {n}</a></div>"#, chapter_link(manga, n)))
        .collect();
    format!(
        r#"<html><body>
        <a href="{manga}"><img src="/thumb{manga}.jpg" title="{name}"></a>
        <div class="limit-html-p"> The story of {name}. </div>
        <div data-name="chapter-list">{links}</div>
        </body></html>"#
    )
}

pub fn page_url(chapter_link: &str, page: usize) -> String {
    format!("https://img.mangapark.test{chapter_link}/{page}.jpg")
}

pub fn chapter_page(chapter_link: &str, pages: usize) -> String {
    let items: String = (1..=pages)
        .map(|p| {
            format!(
                r#"<div data-name="image-item"><img src="{}"></div>"#,
                page_url(chapter_link, p)
            )
        })
        .collect();
    format!("<html><body>{items}</body></html>")
}

/// Catalog answering "kaguya sama" with twelve titles, the first with
/// thirty chapters of three pages each
pub fn kaguya_catalog() -> FakeCatalog {
    let catalog = FakeCatalog::default();

    let mut entries = vec![(
        KAGUYA.to_string(),
        "Kaguya-sama: Love is War".to_string(),
        "/thumb/kaguya.jpg".to_string(),
    )];
    entries.extend((2..=12).map(|i| {
        (
            format!("/title/{i}-kaguya-doujin-{i}"),
            format!("Kaguya Doujin {i}"),
            format!("/thumb/doujin-{i}.png"),
        )
    }));
    catalog.insert(
        &format!("{BASE_URL}/search?word=kaguya%20sama"),
        search_page(&entries),
    );

    catalog.insert(
        &format!("{BASE_URL}{KAGUYA}"),
        title_page(KAGUYA, "Kaguya-sama: Love is War", KAGUYA_CHAPTERS),
    );
    for n in 1..=KAGUYA_CHAPTERS {
        let link = chapter_link(KAGUYA, n);
        catalog.insert(
            &format!("{BASE_URL}{link}"),
            chapter_page(&link, PAGES_PER_CHAPTER),
        );
    }

    catalog
}

pub type TestNavigator = Navigator<FakeCatalog, FakeBookmarks, FakeImages>;

pub fn navigator(
    catalog: &FakeCatalog,
    bookmarks: &FakeBookmarks,
    images: &FakeImages,
    inline: bool,
) -> TestNavigator {
    navigator_with_images(catalog, bookmarks, images.clone(), inline)
}

pub fn navigator_with_images<I>(
    catalog: &FakeCatalog,
    bookmarks: &FakeBookmarks,
    images: I,
    inline: bool,
) -> Navigator<FakeCatalog, FakeBookmarks, I>
where
    I: ImageRepository,
{
    Navigator::new(
        CatalogueService::new(catalog.clone(), Arc::new(MangaparkV1), BASE_URL),
        BookmarkService::new(bookmarks.clone()),
        ImageService::new(images, inline),
    )
}
