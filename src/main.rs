use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use lookbook::api::{AppState, create_router};
use lookbook::client::{ControllerConfig, HttpTransport, SearchController};
use lookbook::config::CONFIG;
use lookbook::data_models::Product;
use lookbook::db::{Database, ProductRepo};
use lookbook::extractor::ChatCompletionsExtractor;

#[derive(Parser)]
#[command(name = "lookbook", about = "Conversational fashion search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the search service and serve the pages
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Submit one query through the search panel and print what it renders
    Search {
        #[arg(long)]
        origin: Option<String>,
        #[arg(long, value_enum, default_value_t = PageKind::Chatbot)]
        page: PageKind,
        /// Query text; may be empty
        #[arg(default_value = "")]
        query: String,
    },
    /// Load a JSON array of products into the catalog collection
    Import {
        file: PathBuf,
        /// Empty the collection before loading
        #[arg(long)]
        replace: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PageKind {
    Chatbot,
    Home,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Serve { bind, static_dir } => serve(bind, static_dir).await,
        Command::Search {
            origin,
            page,
            query,
        } => search(origin, page, query).await,
        Command::Import { file, replace } => import(file, replace).await,
    }
}

async fn serve(bind: Option<String>, static_dir: Option<PathBuf>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
    let static_dir = static_dir.unwrap_or_else(|| PathBuf::from(&CONFIG.static_dir));

    let db = Database::from_config().await?;
    let catalog = ProductRepo::from_config(&db);
    let extractor = ChatCompletionsExtractor::from_config()?;

    let state = Arc::new(AppState::new(Arc::new(extractor), Arc::new(catalog)));
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("shutting down");
        })
        .await?;
    Ok(())
}

async fn search(origin: Option<String>, page: PageKind, query: String) -> Result<()> {
    let origin = origin.unwrap_or_else(|| CONFIG.search_origin.clone());
    let config = match page {
        PageKind::Chatbot => ControllerConfig::chatbot(),
        PageKind::Home => ControllerConfig::home(),
    };

    let controller = SearchController::new(HttpTransport::new(&origin), config);
    controller.submit_query(query).await;
    let view = controller.view().await;

    if let Some(user_message) = view.user_message {
        println!("> {user_message}");
    }
    if let Some(response_message) = view.response_message {
        println!("{response_message}");
    }
    if !view.results_html.is_empty() {
        println!("{}", view.results_html);
    }
    Ok(())
}

async fn import(file: PathBuf, replace: bool) -> Result<()> {
    let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let products: Vec<Product> =
        serde_json::from_str(&raw).context("catalog file must be a JSON array of products")?;

    let db = Database::from_config().await?;
    let repo = ProductRepo::from_config(&db);
    if replace {
        let removed = repo.clear().await?;
        log::info!("removed {} existing products", removed);
    }
    let ids = repo.insert_many(&products).await?;
    log::info!(
        "imported {} products into {} ({} total)",
        ids.len(),
        CONFIG.catalog_collection,
        repo.count().await?
    );
    Ok(())
}
