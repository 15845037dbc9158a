use content_store::ContentStore;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app_state::AppState,
    config::read_config,
    domain::search::{SearchConfig, SearchService, StaticContentSource},
};

mod app_state;
mod config;
mod domain;
mod router;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "search_api=debug,content_store=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = read_config().expect("Failed to read configuration");
    tracing::debug!(?config, "Configuration loaded");

    let store = ContentStore::new(config.content.location());
    let search_service = SearchService::new(
        StaticContentSource::new(store),
        SearchConfig::from(&config.search),
        config.search.index,
    );
    let app_state = AppState::new(search_service);

    if config.search.warm_on_startup {
        let search_service = app_state.search_service.clone();
        tokio::spawn(async move {
            if let Err(e) = search_service.warm().await {
                tracing::error!("Failed to warm search index: {}", e);
            }
        });
    }

    let app = router::create(app_state, &config.application.site_url);

    let addr = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
