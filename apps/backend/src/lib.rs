pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::catalog::Catalog;
use crate::services::progress::{InMemoryProgress, ProgressStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub progress: Arc<RwLock<Box<dyn ProgressStore>>>,
}

impl AppState {
    pub fn new(catalog: Catalog, progress: impl ProgressStore + 'static) -> Self {
        let progress: Box<dyn ProgressStore> = Box::new(progress);
        Self {
            catalog: Arc::new(catalog),
            progress: Arc::new(RwLock::new(progress)),
        }
    }
}

/// Build the full router over the given state.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        // Card routes
        .route("/api/cards", get(routes::cards::list))
        .route("/api/cards/:id", get(routes::cards::get))
        // Formatting routes
        .route("/api/format", post(routes::format::format))
        .route("/api/redact", post(routes::format::redact_drug))
        // Quiz routes
        .route("/api/quiz/choice", get(routes::quiz::choice))
        .route("/api/quiz/typed", get(routes::quiz::typed))
        .route("/api/quiz/case", get(routes::quiz::case))
        // Progress routes
        .route("/api/progress", delete(routes::progress::reset))
        .route("/api/progress/missed", get(routes::progress::missed))
        .route(
            "/api/progress/missed/:id",
            put(routes::progress::mark_missed).delete(routes::progress::unmark_missed),
        )
        .route(
            "/api/progress/history",
            get(routes::progress::history).post(routes::progress::record),
        );

    Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Loading protocol records from {}...", config.cards_path.display());
    let catalog = Catalog::load(&config.cards_path)
        .with_context(|| format!("loading {}", config.cards_path.display()))?;
    if catalog.is_empty() {
        tracing::warn!("No protocol records in {}", config.cards_path.display());
    } else {
        tracing::info!("Loaded {} protocol records", catalog.len());
    }

    let state = AppState::new(catalog, InMemoryProgress::new(config.history_limit));
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
