//! HTTP surface of the crawler
//!
//! Routes:
//! - `POST /parseFonts` - crawl a site and report its font families
//! - `GET /100MostPopular` - republish a listing of popular sites
//! - `GET /health` - liveness probe
//!
//! Every answer is JSON. Crawl and upstream failures are reported in the
//! body as `{ ok: false, reason }` with HTTP 200.

mod popular;
mod routes;

pub use popular::{fetch_popular_sites, PopularSite};
pub use routes::{ParseFontsRequest, ParseFontsResponse};

use crate::config::{Config, PopularConfig};
use crate::crawler::Coordinator;
use crate::FontCrawlError;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// State shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub coordinator: Arc<Coordinator>,
    pub popular: Arc<PopularConfig>,
}

impl AppState {
    pub fn new(coordinator: Coordinator, popular: PopularConfig) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            popular: Arc::new(popular),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FontCrawlError> {
        Ok(Self::new(
            Coordinator::from_config(config)?,
            config.popular.clone(),
        ))
    }
}

/// Builds the application router
///
/// Requests running longer than `request_timeout` are answered with
/// `408 Request Timeout`; the crawl behind them is dropped.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/parseFonts", post(routes::parse_fonts))
        .route("/100MostPopular", get(popular::most_popular))
        .route("/health", get(routes::health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves the API until the process exits
pub async fn serve(config: &Config) -> Result<(), FontCrawlError> {
    let state = AppState::from_config(config)?;
    let app = build_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
