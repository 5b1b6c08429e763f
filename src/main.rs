//! Hannune - news-literacy feed service

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hannune::{
    api::{self, AppState},
    config::Config,
    datastore::SupabaseStore,
    services::{
        curation::CurationService,
        feed::{FeedQuery, FeedService, FeedView},
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hannune=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting hannune feed service...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Connect the hosted store
    let store = Arc::new(SupabaseStore::new(&config.datastore)?);
    tracing::info!(base_url = %config.datastore.base_url, legacy_feed = config.datastore.legacy_feed, "Store client ready");

    // Services
    let feed_service = Arc::new(FeedService::new(
        store.clone(),
        config.feed.page_size,
        Duration::from_secs(config.feed.article_cache_ttl_seconds),
    ));
    let curation_service = Arc::new(CurationService::new(store));

    // Default view: the unfiltered general feed, refreshed on a schedule
    let default_view = Arc::new(FeedView::new(
        feed_service.clone(),
        FeedQuery::general(None),
    ));
    default_view.refresh().await;
    spawn_refresh_task(default_view.clone(), config.feed.refresh_seconds);

    let state = AppState {
        feed_service,
        curation_service,
        default_view,
    };
    let app = api::build_router(state, &config.server.cors_origin);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Keep the default view fresh
fn spawn_refresh_task(view: Arc<FeedView>, refresh_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(refresh_seconds.max(1)));
        // The constructor already ran the first refresh
        interval.tick().await;
        loop {
            interval.tick().await;
            view.refresh().await;
        }
    });
}
