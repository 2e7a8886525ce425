use std::ops::Deref;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
};
use thiserror::Error;
use tokio::sync::OnceCell;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("error connect database: {0}")]
    ConnectError(#[from] sqlx::Error),
    #[error("error migrate database: {0}")]
    MigrateError(#[from] MigrateError),
}

#[derive(Clone)]
pub struct Pool(SqlitePool);

impl From<SqlitePool> for Pool {
    fn from(pool: SqlitePool) -> Self {
        Self(pool)
    }
}

impl Deref for Pool {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub async fn establish_connection(
    database_path: &str,
    create: bool,
) -> Result<Pool, DatabaseError> {
    let opts = SqliteConnectOptions::new()
        .create_if_missing(create)
        .filename(database_path)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .idle_timeout(std::time::Duration::from_secs(60))
        .max_lifetime(std::time::Duration::from_secs(3 * 60))
        .connect_with(opts)
        .await?;

    match sqlx::migrate!("./migrations").run(&pool).await {
        Err(MigrateError::VersionMismatch(version)) => {
            warn!("migration {version} was previously applied but has been modified")
        }
        Err(e) => {
            return Err(e.into());
        }
        _ => {}
    }

    Ok(Pool(pool))
}

/// Shared handle to the bookmark database.
///
/// The pool is opened on first use. Callers racing on that first use all
/// wait for the same connection attempt, so at most one pool ever exists.
pub struct Database {
    path: String,
    create: bool,
    pool: OnceCell<Pool>,
}

impl Database {
    pub fn new(path: &str, create: bool) -> Self {
        Self {
            path: path.to_string(),
            create,
            pool: OnceCell::new(),
        }
    }

    pub async fn pool(&self) -> Result<&Pool, DatabaseError> {
        self.pool
            .get_or_try_init(|| async {
                info!("open database at {}", self.path);
                establish_connection(&self.path, self.create).await
            })
            .await
    }

    pub fn is_open(&self) -> bool {
        self.pool.get().is_some()
    }

    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            info!("closing database...");
            pool.close().await;
        }
    }
}
