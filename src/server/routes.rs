use crate::crawler::CrawlStrategy;
use crate::output::{CrawlResult, ErrorResponse};
use crate::server::AppState;
use crate::url::normalize_seed_url;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /parseFonts`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFontsRequest {
    pub url: String,

    /// Traversal strategy; absent means only the submitted page is examined
    #[serde(default)]
    pub crawl_relative: Option<CrawlStrategy>,

    #[serde(default)]
    pub page_limit: Option<usize>,
}

/// Answer of `POST /parseFonts`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ParseFontsResponse {
    Crawl(CrawlResult),
    Failure(ErrorResponse),
}

pub(crate) async fn parse_fonts(
    State(state): State<AppState>,
    Json(req): Json<ParseFontsRequest>,
) -> Json<ParseFontsResponse> {
    tracing::info!(
        "parseFonts request for {} ({})",
        req.url,
        req.crawl_relative
            .map_or("single page", |strategy| strategy.as_str())
    );

    let seed = match normalize_seed_url(&req.url) {
        Ok(seed) => seed,
        Err(e) => return Json(ParseFontsResponse::Failure(ErrorResponse::new(e.to_string()))),
    };

    let probe = state.coordinator.fetcher().fetch(seed.as_str()).await;
    if !probe.is_success() {
        tracing::info!(
            "{} responded with HTTP status {}",
            req.url,
            probe.status_code()
        );
        return Json(ParseFontsResponse::Failure(ErrorResponse::http_status(
            probe.status_code(),
        )));
    }

    match state
        .coordinator
        .crawl(&seed, req.crawl_relative, req.page_limit)
        .await
    {
        Ok(result) => Json(ParseFontsResponse::Crawl(result)),
        Err(e) => {
            tracing::warn!("Crawl of {} failed: {}", seed, e);
            Json(ParseFontsResponse::Failure(ErrorResponse::new(e.to_string())))
        }
    }
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
