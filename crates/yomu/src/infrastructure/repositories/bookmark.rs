use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::{
    domain::{
        entities::bookmark::Bookmark,
        repositories::bookmark::{BookmarkRepository, BookmarkRepositoryError},
    },
    infrastructure::database::Database,
};

#[derive(Clone)]
pub struct BookmarkRepositoryImpl {
    db: Arc<Database>,
}

impl BookmarkRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkRepository for BookmarkRepositoryImpl {
    async fn insert_user_if_absent(&self, user_id: i64) -> Result<(), BookmarkRepositoryError> {
        let pool = self.db.pool().await?;

        sqlx::query(r#"INSERT OR IGNORE INTO reader(id) VALUES (?)"#)
            .bind(user_id)
            .execute(pool as &SqlitePool)
            .await?;

        Ok(())
    }

    async fn upsert_bookmark(
        &self,
        user_id: i64,
        manga_link: &str,
        chapter: usize,
    ) -> Result<(), BookmarkRepositoryError> {
        let pool = self.db.pool().await?;
        let mut tx = pool.begin().await?;

        sqlx::query(r#"INSERT OR IGNORE INTO reader(id) VALUES (?)"#)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO
            bookmark(user_id, manga_link, chapter, updated_at)
            VALUES(?, ?, ?, ?)
            ON CONFLICT(user_id, manga_link)
            DO UPDATE SET
            chapter = excluded.chapter,
            updated_at = excluded.updated_at"#,
        )
        .bind(user_id)
        .bind(manga_link)
        .bind(chapter as i64)
        .bind(chrono::Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_bookmarks(&self, user_id: i64) -> Result<Vec<Bookmark>, BookmarkRepositoryError> {
        let pool = self.db.pool().await?;

        let bookmarks = sqlx::query(
            r#"
            SELECT user_id, manga_link, chapter
            FROM bookmark
            WHERE user_id = ?
            ORDER BY id"#,
        )
        .bind(user_id)
        .fetch_all(pool as &SqlitePool)
        .await?
        .into_iter()
        .map(|row| Bookmark {
            user_id: row.get(0),
            manga_link: row.get(1),
            chapter: row.get::<i64, _>(2) as usize,
        })
        .collect();

        Ok(bookmarks)
    }
}
