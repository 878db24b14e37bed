//! `GET /100MostPopular`: a trimmed copy of an upstream site listing
//!
//! The listing is read page by page (`?limit=&offset=&sort=`), sequentially,
//! and each entry is reduced to its title, author, description and
//! thumbnail. Nothing is cached.

use crate::config::PopularConfig;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One entry of the upstream listing; only the fields republished are read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedSite {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    author: Option<ListedAuthor>,
    #[serde(default)]
    thumb_img: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListedAuthor {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

impl ListedAuthor {
    /// "First Last", or empty unless both names are present
    fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                format!("{} {}", first, last)
            }
            _ => String::new(),
        }
    }
}

/// A popular site as republished by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularSite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_img: Option<Value>,
}

impl From<ListedSite> for PopularSite {
    fn from(site: ListedSite) -> Self {
        Self {
            title: site.title,
            author: site
                .author
                .as_ref()
                .map(ListedAuthor::display_name)
                .unwrap_or_default(),
            description: site.description,
            thumb_img: site.thumb_img,
        }
    }
}

/// Reads every configured listing page, in order
///
/// The first failing page (transport error, non-2xx status or a body that
/// is not a JSON array of sites) fails the whole call.
pub async fn fetch_popular_sites(
    client: &Client,
    config: &PopularConfig,
) -> Result<Vec<PopularSite>, reqwest::Error> {
    let mut sites = Vec::new();

    for page in 0..config.pages {
        let offset = page * config.page_size;
        tracing::debug!("Fetching popular sites at offset {}", offset);

        let listed: Vec<ListedSite> = client
            .get(&config.endpoint)
            .query(&[
                ("limit", config.page_size.to_string()),
                ("offset", offset.to_string()),
                ("sort", config.sort.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        sites.extend(listed.into_iter().map(PopularSite::from));
    }

    Ok(sites)
}

pub(crate) async fn most_popular(State(state): State<AppState>) -> Json<Value> {
    let client = state.coordinator.fetcher().client();

    match fetch_popular_sites(client, &state.popular).await {
        Ok(data) => {
            tracing::info!("Serving {} popular sites", data.len());
            Json(json!({ "ok": true, "data": data }))
        }
        Err(e) => {
            tracing::warn!("Popular sites listing unavailable: {}", e);
            Json(json!({ "ok": false, "reason": e.to_string() }))
        }
    }
}
