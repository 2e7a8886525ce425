use thiserror::Error;

use crate::domain::{
    entities::bookmark::Bookmark,
    repositories::bookmark::{BookmarkRepository, BookmarkRepositoryError},
};

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("repository error: {0}")]
    RepositoryError(#[from] BookmarkRepositoryError),
}

#[derive(Clone)]
pub struct BookmarkService<R>
where
    R: BookmarkRepository,
{
    repo: R,
}

impl<R> BookmarkService<R>
where
    R: BookmarkRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn upsert_bookmark(
        &self,
        user_id: i64,
        manga_link: &str,
        chapter: usize,
    ) -> Result<(), BookmarkError> {
        self.repo.insert_user_if_absent(user_id).await?;
        self.repo
            .upsert_bookmark(user_id, manga_link, chapter)
            .await?;

        info!("user {user_id} bookmarked chapter {chapter} of {manga_link}");

        Ok(())
    }

    /// Unknown users get an empty record instead of an error
    pub async fn get_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, BookmarkError> {
        self.repo.insert_user_if_absent(user_id).await?;

        Ok(self.repo.get_bookmarks(user_id).await?)
    }

    pub async fn find_bookmark(
        &self,
        user_id: i64,
        manga_link: &str,
    ) -> Result<Option<usize>, BookmarkError> {
        let chapter = self
            .get_bookmarks(user_id)
            .await?
            .into_iter()
            .find(|bookmark| bookmark.manga_link == manga_link)
            .map(|bookmark| bookmark.chapter);

        Ok(chapter)
    }
}
