#[macro_use]
extern crate log;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use yomu::{
    application::navigation::{Action, NavigationSession, Navigator, RenderRequest},
    domain::services::{
        bookmark::BookmarkService, catalogue::CatalogueService, image::ImageService,
    },
    infrastructure::{
        config::{CacheBackend, Config},
        database::Database,
        http::build_client,
        mangapark::{self, MangaparkV1},
        repositories::{
            bookmark::BookmarkRepositoryImpl,
            document::{CachedDocumentRepository, DocumentRepositoryImpl},
            document_cache::{
                DocumentCacheRepositoryImpl, FileDocumentCache, MemoryDocumentCache,
            },
            image::{CachedImageRepository, ImageRepositoryImpl},
            image_cache::{FileImageCache, ImageCacheRepositoryImpl, MemoryImageCache},
        },
    },
};
use yomu_lib::prelude::{Extractor, Version};

type AppNavigator = Navigator<
    CachedDocumentRepository<DocumentRepositoryImpl, DocumentCacheRepositoryImpl>,
    BookmarkRepositoryImpl,
    CachedImageRepository<ImageRepositoryImpl, ImageCacheRepositoryImpl>,
>;

#[derive(Parser)]
#[clap(version, about)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    subcmd: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Search the catalog
    Search { query: String },
    /// List chapters of a manga, oldest first
    Chapters { link: String },
    /// List page images of a chapter
    Pages { link: String },
    Describe { link: String },
    /// List bookmarks of a user
    Bookmarks {
        #[clap(long)]
        user: i64,
    },
    /// Save a chapter index as the user's bookmark for a manga
    Bookmark {
        #[clap(long)]
        user: i64,
        link: String,
        chapter: usize,
    },
    /// Run the extractor on a saved page
    Parse {
        #[clap(value_enum)]
        kind: DocumentKind,
        file: PathBuf,
        /// Version of the catalog markup the page was saved from
        #[clap(long, default_value_t = MangaparkV1::VERSION)]
        markup: Version,
    },
    /// Read actions as json lines from stdin and answer with render requests.
    /// Without a query the session starts from the user's bookmarks
    Session {
        #[clap(long)]
        user: i64,
        #[clap(long)]
        query: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DocumentKind {
    Search,
    Chapters,
    Pages,
    Description,
}

fn init_logger() {
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        if let Ok(yomu_log) = std::env::var("YOMU_LOG") {
            builder.parse_filters(&format!("yomu={yomu_log}"));
        }
    }
    builder.init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_logger();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl+c signal");
                cancel.cancel();
            }
        }
    });

    let client = build_client(&config.base_url, config.request_timeout())?;

    let ttl = config.cache_ttl();
    let (document_cache, image_cache) = match config.cache.backend {
        CacheBackend::Memory => (
            DocumentCacheRepositoryImpl::Memory(MemoryDocumentCache::new(ttl)),
            ImageCacheRepositoryImpl::Memory(MemoryImageCache::new(ttl)),
        ),
        CacheBackend::File => (
            DocumentCacheRepositoryImpl::File(FileDocumentCache::new(&config.cache.path)),
            ImageCacheRepositoryImpl::File(FileImageCache::new(
                Path::new(&config.cache.path).join("images"),
            )),
        ),
    };
    let document_repo = CachedDocumentRepository::new(
        DocumentRepositoryImpl::new(client.clone(), config.request_timeout())
            .with_cancellation(cancel.clone()),
        document_cache,
        ttl,
    );
    let catalogue_svc =
        CatalogueService::new(document_repo, Arc::new(MangaparkV1), &config.base_url);
    info!(
        "using {} (yomu-lib {})",
        catalogue_svc.extractor_info(),
        yomu_lib::LIB_VERSION
    );

    let db = Arc::new(Database::new(&config.database_path, config.create_database));
    let bookmark_svc = BookmarkService::new(BookmarkRepositoryImpl::new(db.clone()));

    let image_repo = CachedImageRepository::new(
        ImageRepositoryImpl::new(client, &config.base_url, config.request_timeout())
            .with_cancellation(cancel.clone()),
        image_cache,
        ttl,
    );
    let image_svc = ImageService::new(image_repo, config.inline_images);

    let navigator = Navigator::new(catalogue_svc, bookmark_svc, image_svc);

    let res = run(&navigator, opts.subcmd).await;

    db.close().await;

    res
}

async fn run(navigator: &AppNavigator, subcmd: SubCommand) -> Result<(), anyhow::Error> {
    match subcmd {
        SubCommand::Search { query } => {
            print_json(&navigator.catalogue().search(&query).await?)?;
        }
        SubCommand::Chapters { link } => {
            print_json(&navigator.catalogue().fetch_chapters(&link).await?)?;
        }
        SubCommand::Pages { link } => {
            print_json(&navigator.catalogue().fetch_pages(&link).await?)?;
        }
        SubCommand::Describe { link } => {
            println!("{}", navigator.catalogue().fetch_description(&link).await?);
        }
        SubCommand::Bookmarks { user } => {
            print_json(&navigator.bookmarks().get_bookmarks(user).await?)?;
        }
        SubCommand::Bookmark {
            user,
            link,
            chapter,
        } => {
            navigator
                .bookmarks()
                .upsert_bookmark(user, &link, chapter)
                .await?;
        }
        SubCommand::Session { user, query } => {
            session(navigator, user, query).await?;
        }
        SubCommand::Parse { kind, file, markup } => {
            parse(kind, &file, &markup).await?;
        }
    }

    Ok(())
}

async fn parse(kind: DocumentKind, file: &Path, markup: &Version) -> Result<(), anyhow::Error> {
    let extractor = mangapark::extractor_for(markup)
        .ok_or_else(|| anyhow::anyhow!("no extractor reads markup version {markup}"))?;
    debug!("parsing {} with {}", file.display(), extractor.info());

    let html = tokio::fs::read_to_string(file).await?;

    match kind {
        DocumentKind::Search => print_json(&extractor.parse_search_results(&html)?),
        DocumentKind::Chapters => print_json(&extractor.parse_chapter_list(&html)?),
        DocumentKind::Pages => print_json(&extractor.parse_page_images(&html)?),
        DocumentKind::Description => print_json(&extractor.parse_description(&html)?),
    }
}

async fn write_render<W>(out: &mut W, render: &RenderRequest) -> Result<(), anyhow::Error>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(render)?;
    line.push(b'\n');
    out.write_all(&line).await?;
    out.flush().await?;

    Ok(())
}

async fn session(
    navigator: &AppNavigator,
    user_id: i64,
    query: Option<String>,
) -> Result<(), anyhow::Error> {
    let mut stdout = tokio::io::stdout();

    let mut session = NavigationSession::new(user_id, query.as_deref().unwrap_or_default());
    let render = match query {
        Some(_) => navigator.dispatch(&mut session, Action::Confirm).await,
        None => match navigator.from_bookmarks(user_id).await {
            Ok((bookmarks, render)) => {
                session = bookmarks;
                render
            }
            Err(e) => RenderRequest::failure(&e),
        },
    };
    write_render(&mut stdout, &render).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let render = match serde_json::from_str::<Action>(line) {
            Ok(action) => navigator.dispatch(&mut session, action).await,
            Err(e) => {
                warn!("invalid action {line:?}: {e}");
                RenderRequest::failure(&e)
            }
        };
        write_render(&mut stdout, &render).await?;
    }

    debug!("session of user {user_id} ended at {}", session.stage);

    Ok(())
}
