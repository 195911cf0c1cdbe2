//! Deck Advisor server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deck_advisor::cards::CardIndex;
use deck_advisor::config::{Config, LogFormat};
use deck_advisor::db::{self, Repository};
use deck_advisor::importer::{CatalogImporter, HttpSource, SnapshotEndpoints};
use deck_advisor::notify::TracingNotifier;
use deck_advisor::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    tracing::info!("Starting Deck Advisor");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Card database: {:?}", config.cards_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    let cards = CardIndex::load(&config.cards_path).await?;
    tracing::info!("Loaded {} cards", cards.len());

    let importer = CatalogImporter::new(
        Arc::new(HttpSource::new(config.http_timeout)?),
        Arc::new(cards),
        repo.clone(),
        Arc::new(TracingNotifier),
        SnapshotEndpoints {
            decks_url: config.decks_url.clone(),
            archetypes_url: config.archetypes_url.clone(),
        },
    )
    .with_notify_timeout(config.notify_timeout);

    let state = AppState::new(repo, importer);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
