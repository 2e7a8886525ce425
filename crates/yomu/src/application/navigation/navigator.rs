use thiserror::Error;

use crate::domain::{
    entities::{image::RenderImage, manga::Manga},
    repositories::{
        bookmark::BookmarkRepository, document::DocumentRepository, image::ImageRepository,
    },
    services::{
        bookmark::{BookmarkError, BookmarkService},
        catalogue::{CatalogueError, CatalogueService},
        image::{ImageError, ImageService},
    },
};

use super::{
    action::{Action, ActionKind},
    chunk::{chunk_bounds, chunk_count, chunk_of, cycle},
    render::{RenderRequest, SelectOption},
    session::{NavigationSession, Stage},
};

pub const MAX_SEARCH_RESULTS: usize = 10;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    NotFound(String),
    #[error("{action} is not available while {stage}")]
    UnsupportedAction { stage: Stage, action: ActionKind },
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Drives sessions from one stage to the next.
///
/// A transition either yields a complete new session together with its
/// render, or fails and leaves the caller's session as it was.
pub struct Navigator<D, B, I>
where
    D: DocumentRepository,
    B: BookmarkRepository,
    I: ImageRepository,
{
    catalogue: CatalogueService<D>,
    bookmarks: BookmarkService<B>,
    images: ImageService<I>,
}

impl<D, B, I> Navigator<D, B, I>
where
    D: DocumentRepository,
    B: BookmarkRepository,
    I: ImageRepository,
{
    pub fn new(
        catalogue: CatalogueService<D>,
        bookmarks: BookmarkService<B>,
        images: ImageService<I>,
    ) -> Self {
        Self {
            catalogue,
            bookmarks,
            images,
        }
    }

    pub fn catalogue(&self) -> &CatalogueService<D> {
        &self.catalogue
    }

    pub fn bookmarks(&self) -> &BookmarkService<B> {
        &self.bookmarks
    }

    pub fn images(&self) -> &ImageService<I> {
        &self.images
    }

    /// Starts a session for `query` and runs the search
    pub async fn search(
        &self,
        user_id: i64,
        query: &str,
    ) -> Result<(NavigationSession, RenderRequest), SessionError> {
        let session = NavigationSession::new(user_id, query);
        self.handle(&session, Action::Confirm).await
    }

    /// Starts a session choosing among the manga the user has bookmarked
    pub async fn from_bookmarks(
        &self,
        user_id: i64,
    ) -> Result<(NavigationSession, RenderRequest), SessionError> {
        let bookmarks = self.bookmarks.get_bookmarks(user_id).await?;
        if bookmarks.is_empty() {
            return Err(SessionError::NotFound(
                "you have not bookmarked anything yet".to_string(),
            ));
        }

        let results = futures::future::try_join_all(
            bookmarks
                .iter()
                .map(|bookmark| self.catalogue.fetch_manga(&bookmark.manga_link)),
        )
        .await?;

        let mut session = NavigationSession::new(user_id, "");
        session.stage = Stage::SelectingManga;
        session.results = results;

        let render = self.render(&session).await?;
        Ok((session, render))
    }

    pub async fn handle(
        &self,
        session: &NavigationSession,
        action: Action,
    ) -> Result<(NavigationSession, RenderRequest), SessionError> {
        let mut next = session.clone();
        self.apply(&mut next, action).await?;

        let render = self.render(&next).await?;
        Ok((next, render))
    }

    /// Like [`Navigator::handle`] but commits into `session`, a failure
    /// keeps the session and renders a notice instead
    pub async fn dispatch(&self, session: &mut NavigationSession, action: Action) -> RenderRequest {
        match self.handle(session, action).await {
            Ok((next, render)) => {
                *session = next;
                render
            }
            Err(e) => {
                warn!(
                    "user {} failed to {} while {}: {e}",
                    session.user_id,
                    action.kind(),
                    session.stage
                );
                RenderRequest::failure(&e)
            }
        }
    }

    async fn apply(
        &self,
        session: &mut NavigationSession,
        action: Action,
    ) -> Result<(), SessionError> {
        match (session.stage, action) {
            (Stage::Searching, Action::Confirm) => self.run_search(session).await,
            (Stage::SelectingManga, Action::Select(index)) => {
                if index >= session.results.len() {
                    return Err(SessionError::NotFound(format!("no manga at position {index}")));
                }
                session.selected_manga = index;
                Ok(())
            }
            (Stage::SelectingManga, Action::Confirm) => self.open_manga(session).await,
            (Stage::SelectingChapter, Action::CycleLeft | Action::CycleRight) => {
                let count = chunk_count(session.chapters.len());
                session.chunk = cycle(session.chunk, count, action == Action::CycleRight);
                session.selected_chapter = None;
                Ok(())
            }
            (Stage::SelectingChapter, Action::Select(index)) => {
                if !chunk_bounds(session.chunk, session.chapters.len()).contains(&index) {
                    return Err(SessionError::NotFound(format!(
                        "no chapter at position {index} on this page"
                    )));
                }
                session.selected_chapter = Some(index);
                Ok(())
            }
            (Stage::SelectingChapter, Action::Confirm) => {
                let chapter = session
                    .selected_chapter
                    .or(session.bookmark)
                    .ok_or_else(|| SessionError::NotFound("no chapter selected".to_string()))?;
                self.enter_chapter(session, chapter).await
            }
            (Stage::SelectingChapter | Stage::Reading, Action::JumpToBookmark) => {
                let chapter = session.bookmark.ok_or_else(|| {
                    SessionError::NotFound("this manga has no bookmark".to_string())
                })?;
                self.enter_chapter(session, chapter).await
            }
            (Stage::Reading, Action::CycleLeft | Action::CycleRight) => {
                let forward = action == Action::CycleRight;
                session.page = cycle(session.page, session.pages.len(), forward);
                Ok(())
            }
            (Stage::Reading, Action::PrevChapter | Action::NextChapter) => {
                let chapter = cycle(
                    session.chapter,
                    session.chapters.len(),
                    action == Action::NextChapter,
                );
                self.enter_chapter(session, chapter).await
            }
            (Stage::Reading, Action::Bookmark) => {
                let link = self.current_manga(session)?.link.clone();
                self.bookmarks
                    .upsert_bookmark(session.user_id, &link, session.chapter)
                    .await?;
                session.bookmark = Some(session.chapter);
                Ok(())
            }
            (stage, action) => Err(SessionError::UnsupportedAction {
                stage,
                action: action.kind(),
            }),
        }
    }

    async fn run_search(&self, session: &mut NavigationSession) -> Result<(), SessionError> {
        let mut results = self.catalogue.search(&session.query).await?;
        results.truncate(MAX_SEARCH_RESULTS);
        if results.is_empty() {
            return Err(SessionError::NotFound(format!(
                "no manga found for {:?}",
                session.query
            )));
        }

        session.stage = Stage::SelectingManga;
        session.results = results;
        session.selected_manga = 0;

        Ok(())
    }

    async fn open_manga(&self, session: &mut NavigationSession) -> Result<(), SessionError> {
        let manga = session
            .selected_result()
            .cloned()
            .ok_or_else(|| SessionError::NotFound("no manga selected".to_string()))?;

        let chapters = self.catalogue.fetch_chapters(&manga.link).await?;
        if chapters.is_empty() {
            return Err(SessionError::NotFound(format!("{} has no chapters", manga.name)));
        }

        let description = match self.catalogue.fetch_description(&manga.link).await {
            Ok(description) => Some(description),
            Err(e) => {
                warn!("no description for {}: {e}", manga.link);
                None
            }
        };

        let bookmark = match self
            .bookmarks
            .find_bookmark(session.user_id, &manga.link)
            .await?
        {
            Some(chapter) if chapter < chapters.len() => Some(chapter),
            Some(chapter) => {
                warn!(
                    "ignoring bookmark on chapter {chapter} of {}, it only has {} chapters",
                    manga.link,
                    chapters.len()
                );
                None
            }
            None => None,
        };

        session.stage = Stage::SelectingChapter;
        session.manga = Some(manga);
        session.description = description;
        session.chapters = chapters;
        session.chunk = bookmark.map(chunk_of).unwrap_or(0);
        session.selected_chapter = None;
        session.bookmark = bookmark;

        Ok(())
    }

    async fn enter_chapter(
        &self,
        session: &mut NavigationSession,
        index: usize,
    ) -> Result<(), SessionError> {
        let chapter = session
            .chapters
            .get(index)
            .ok_or_else(|| SessionError::NotFound(format!("no chapter at position {index}")))?;

        let pages = self.catalogue.fetch_pages(&chapter.link).await?;
        debug!("{} has {} pages", chapter.link, pages.len());

        session.stage = Stage::Reading;
        session.chapter = index;
        session.page = 0;
        session.pages = pages;

        Ok(())
    }

    fn current_manga<'a>(&self, session: &'a NavigationSession) -> Result<&'a Manga, SessionError> {
        session
            .manga
            .as_ref()
            .ok_or_else(|| SessionError::NotFound("no manga opened".to_string()))
    }

    /// Covers are decoration, a cover that cannot be shown is left out
    async fn render_cover(&self, manga: &Manga) -> Option<RenderImage> {
        match self
            .images
            .render_image(&self.catalogue.absolute_url(&manga.cover))
            .await
        {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("cannot show cover of {}: {e}", manga.link);
                None
            }
        }
    }

    fn manga_link(&self, manga: &Manga) -> String {
        format!("[{}]({})", manga.name, self.catalogue.absolute_url(&manga.link))
    }

    async fn render(&self, session: &NavigationSession) -> Result<RenderRequest, SessionError> {
        let render = match session.stage {
            Stage::Searching => RenderRequest {
                title: format!("Search for *{}*", session.query),
                actions: vec![ActionKind::Confirm],
                ..Default::default()
            },
            Stage::SelectingManga => {
                let manga = session
                    .selected_result()
                    .ok_or_else(|| SessionError::NotFound("no manga selected".to_string()))?;

                let title = if session.query.is_empty() {
                    "Your Bookmarks".to_string()
                } else {
                    format!("Search Results for *{}*", session.query)
                };

                RenderRequest {
                    title,
                    description: self.manga_link(manga),
                    image: self.render_cover(manga).await,
                    footer: Some(format!(
                        "{} of {}",
                        session.selected_manga + 1,
                        session.results.len()
                    )),
                    options: session
                        .results
                        .iter()
                        .enumerate()
                        .map(|(index, manga)| SelectOption {
                            index,
                            label: manga.name.clone(),
                            default: index == session.selected_manga,
                        })
                        .collect(),
                    actions: vec![ActionKind::Select, ActionKind::Confirm],
                    notice: None,
                }
            }
            Stage::SelectingChapter => {
                let manga = self.current_manga(session)?;
                let bounds = chunk_bounds(session.chunk, session.chapters.len());
                let highlighted = session.selected_chapter.or(session.bookmark);

                let mut actions = vec![
                    ActionKind::Select,
                    ActionKind::Confirm,
                    ActionKind::CycleLeft,
                    ActionKind::CycleRight,
                ];
                if session.bookmark.is_some() {
                    actions.push(ActionKind::JumpToBookmark);
                }

                RenderRequest {
                    title: manga.name.clone(),
                    description: session
                        .description
                        .clone()
                        .unwrap_or_else(|| self.manga_link(manga)),
                    image: self.render_cover(manga).await,
                    footer: Some(format!(
                        "Chapters {}-{} of {}",
                        bounds.start + 1,
                        bounds.end,
                        session.chapters.len()
                    )),
                    options: session.chapters[bounds.clone()]
                        .iter()
                        .zip(bounds)
                        .map(|(chapter, index)| SelectOption {
                            index,
                            label: chapter.name.clone(),
                            default: highlighted == Some(index),
                        })
                        .collect(),
                    actions,
                    notice: None,
                }
            }
            Stage::Reading => {
                let manga = self.current_manga(session)?;
                let chapter = session.current_chapter().ok_or_else(|| {
                    SessionError::NotFound(format!("no chapter at position {}", session.chapter))
                })?;
                let page = session.current_page().ok_or_else(|| {
                    SessionError::NotFound(format!("no page at position {}", session.page))
                })?;

                let image = self
                    .images
                    .render_image(&self.catalogue.absolute_url(page))
                    .await?;

                let mut actions = vec![
                    ActionKind::CycleLeft,
                    ActionKind::CycleRight,
                    ActionKind::PrevChapter,
                    ActionKind::NextChapter,
                    ActionKind::Bookmark,
                ];
                if session.bookmark.is_some() {
                    actions.push(ActionKind::JumpToBookmark);
                }

                RenderRequest {
                    title: chapter.name.clone(),
                    description: self.manga_link(manga),
                    image: Some(image),
                    footer: Some(format!("Page #{}", session.page + 1)),
                    options: vec![],
                    actions,
                    notice: None,
                }
            }
        };

        Ok(render)
    }
}
