use async_trait::async_trait;
use thiserror::Error;

use crate::{domain::entities::bookmark::Bookmark, infrastructure::database::DatabaseError};

#[derive(Debug, Error)]
pub enum BookmarkRepositoryError {
    #[error("database error: {0}")]
    DbError(#[from] sqlx::Error),
    #[error("connection error: {0}")]
    ConnectionError(#[from] DatabaseError),
}

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Creates the user record with no bookmarks unless it already exists
    async fn insert_user_if_absent(&self, user_id: i64) -> Result<(), BookmarkRepositoryError>;

    /// Inserts the bookmark, or overwrites the chapter of the existing one for the pair
    async fn upsert_bookmark(
        &self,
        user_id: i64,
        manga_link: &str,
        chapter: usize,
    ) -> Result<(), BookmarkRepositoryError>;

    async fn get_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, BookmarkRepositoryError>;
}
