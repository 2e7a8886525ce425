use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{chapter::Chapter, manga::Manga};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Searching,
    SelectingManga,
    SelectingChapter,
    Reading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Searching => "searching",
            Stage::SelectingManga => "selecting manga",
            Stage::SelectingChapter => "selecting chapter",
            Stage::Reading => "reading",
        };
        write!(f, "{name}")
    }
}

/// State of one user's browsing, from a search down to a page.
///
/// Sessions are plain values: the navigator derives a new one for every
/// action and the front-end decides where to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSession {
    pub user_id: i64,
    pub query: String,
    pub stage: Stage,
    #[serde(default)]
    pub results: Vec<Manga>,
    #[serde(default)]
    pub selected_manga: usize,
    #[serde(default)]
    pub manga: Option<Manga>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub chunk: usize,
    #[serde(default)]
    pub selected_chapter: Option<usize>,
    /// Bookmarked chapter of `manga`, if any
    #[serde(default)]
    pub bookmark: Option<usize>,
    #[serde(default)]
    pub chapter: usize,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub pages: Vec<String>,
}

impl NavigationSession {
    pub fn new(user_id: i64, query: &str) -> Self {
        Self {
            user_id,
            query: query.to_string(),
            stage: Stage::Searching,
            results: vec![],
            selected_manga: 0,
            manga: None,
            description: None,
            chapters: vec![],
            chunk: 0,
            selected_chapter: None,
            bookmark: None,
            chapter: 0,
            page: 0,
            pages: vec![],
        }
    }

    pub fn selected_result(&self) -> Option<&Manga> {
        self.results.get(self.selected_manga)
    }

    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.chapter)
    }

    pub fn current_page(&self) -> Option<&str> {
        self.pages.get(self.page).map(String::as_str)
    }
}
