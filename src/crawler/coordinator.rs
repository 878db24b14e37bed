//! Crawler coordinator - traversal of a site's link graph
//!
//! This module drives repeated fetch → extract → discover-links cycles:
//! - single-page extraction (the default mode)
//! - breadth-first traversal over a FIFO frontier
//! - depth-first traversal following the first outbound link of each page
//!
//! Every crawl gets a fresh [`CrawlSession`] and is strictly sequential:
//! each page is fully processed before the next one is fetched.

use crate::config::Config;
use crate::crawler::document::{load_document, Document};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::fonts::get_page_fonts;
use crate::output::{CrawlResult, CrawlStatistics};
use crate::state::CrawlSession;
use crate::url::resolve_href;
use crate::FontCrawlError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// How a crawl walks the link graph beyond the seed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlStrategy {
    BreadthFirst,
    DepthFirst,
}

impl CrawlStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth-first",
            Self::DepthFirst => "depth-first",
        }
    }
}

impl fmt::Display for CrawlStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrawlStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breadth-first" => Ok(Self::BreadthFirst),
            "depth-first" => Ok(Self::DepthFirst),
            other => Err(format!(
                "unknown crawl strategy '{}' (expected breadth-first or depth-first)",
                other
            )),
        }
    }
}

/// Main crawler coordinator structure
#[derive(Debug, Clone)]
pub struct Coordinator {
    fetcher: Fetcher,
    default_page_limit: usize,
    max_page_limit: usize,
}

impl Coordinator {
    /// Creates a coordinator whose crawls default to a single page
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            default_page_limit: 1,
            max_page_limit: usize::MAX,
        }
    }

    /// Creates a coordinator from the `[crawler]` and `[user-agent]` sections
    pub fn from_config(config: &Config) -> Result<Self, FontCrawlError> {
        let fetcher = Fetcher::from_config(config)?;
        Ok(Self::new(fetcher)
            .with_page_limits(config.crawler.default_page_limit, config.crawler.max_page_limit))
    }

    /// Sets the limit used when a caller names none, and the ceiling applied
    /// to the limits callers do name
    pub fn with_page_limits(mut self, default_page_limit: usize, max_page_limit: usize) -> Self {
        self.max_page_limit = max_page_limit.max(1);
        self.default_page_limit = default_page_limit.clamp(1, self.max_page_limit);
        self
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// The page limit a crawl actually runs with
    ///
    /// A missing or zero limit falls back to the default; anything above the
    /// ceiling is clamped.
    pub fn effective_page_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(limit) if limit > 0 => limit.min(self.max_page_limit),
            _ => self.default_page_limit,
        }
    }

    /// Runs one crawl from `seed`
    ///
    /// Without a strategy only the seed page is examined.
    pub async fn crawl(
        &self,
        seed: &Url,
        strategy: Option<CrawlStrategy>,
        page_limit: Option<usize>,
    ) -> Result<CrawlResult, FontCrawlError> {
        match strategy {
            Some(CrawlStrategy::BreadthFirst) => self.breadth_first(seed, page_limit).await,
            Some(CrawlStrategy::DepthFirst) => self.depth_first(seed, page_limit).await,
            None => self.single_page(seed).await,
        }
    }

    /// Extracts the fonts of the seed page only
    pub async fn single_page(&self, seed: &Url) -> Result<CrawlResult, FontCrawlError> {
        tracing::info!("Starting single-page font extraction for {}", seed);

        let mut session = CrawlSession::new();
        let mut stats = CrawlStatistics::default();
        self.visit(seed, &mut session, &mut stats).await?;

        Ok(finish(session, &stats))
    }

    /// Breadth-first traversal
    ///
    /// # Loop
    ///
    /// 1. Pop the head of the frontier; skip it if it was visited meanwhile
    /// 2. Load it, mark it visited, extract its fonts
    /// 3. Stop once the number of visited pages reaches the limit
    /// 4. Append every resolved, unvisited link to the tail of the frontier
    ///
    /// The crawl also ends when the frontier runs dry.
    pub async fn breadth_first(
        &self,
        seed: &Url,
        page_limit: Option<usize>,
    ) -> Result<CrawlResult, FontCrawlError> {
        let limit = self.effective_page_limit(page_limit);
        tracing::info!("Starting breadth-first crawl of {} (limit {})", seed, limit);

        let mut session = CrawlSession::new();
        let mut stats = CrawlStatistics::default();
        let mut frontier = VecDeque::from([seed.clone()]);
        let mut limit_reached = false;

        while let Some(url) = frontier.pop_front() {
            if session.is_visited(&url) {
                continue;
            }

            let document = self.visit(&url, &mut session, &mut stats).await?;

            if session.visited_count() >= limit {
                limit_reached = true;
                break;
            }

            frontier.extend(
                document
                    .links()
                    .iter()
                    .filter_map(|href| resolve_href(document.base_url(), href))
                    .filter(|next| !session.is_visited(next)),
            );
        }

        if limit_reached {
            tracing::debug!("Page limit {} reached", limit);
        } else {
            tracing::debug!("Frontier exhausted after {} pages", session.visited_count());
        }

        Ok(finish(session, &stats))
    }

    /// Depth-first traversal
    ///
    /// Only the first outbound link of each page is considered: the crawl
    /// descends into it if it has not been visited, and stops otherwise.
    /// The other links only decide whether to go on at all: a page with
    /// fewer than two links ends the crawl. Sibling links are never
    /// backtracked into.
    pub async fn depth_first(
        &self,
        seed: &Url,
        page_limit: Option<usize>,
    ) -> Result<CrawlResult, FontCrawlError> {
        let limit = self.effective_page_limit(page_limit);
        tracing::info!("Starting depth-first crawl of {} (limit {})", seed, limit);

        let mut session = CrawlSession::new();
        let mut stats = CrawlStatistics::default();
        let mut next = Some(seed.clone());

        while let Some(url) = next.take() {
            let document = self.visit(&url, &mut session, &mut stats).await?;

            if session.visited_count() >= limit {
                tracing::debug!("Page limit {} reached", limit);
                break;
            }

            // A page with a single link ends the descent
            let links = document.links();
            if links.len() < 2 {
                tracing::debug!("{} has {} links, stopping", url, links.len());
                break;
            }

            next = resolve_href(document.base_url(), &links[0])
                .filter(|candidate| !session.is_visited(candidate));
        }

        Ok(finish(session, &stats))
    }

    /// Loads one page, marks it visited and extracts its fonts
    async fn visit(
        &self,
        url: &Url,
        session: &mut CrawlSession,
        stats: &mut CrawlStatistics,
    ) -> Result<Document, FontCrawlError> {
        tracing::debug!("Processing URL: {}", url);

        let document = load_document(&self.fetcher, url).await?;
        session.mark_visited(url);

        let report = get_page_fonts(&self.fetcher, &document, session).await;
        stats.record_page(&report);

        tracing::debug!(
            "{}: {} new fonts, {} links",
            url,
            report.fonts_recorded,
            document.links().len()
        );

        Ok(document)
    }
}

fn finish(session: CrawlSession, stats: &CrawlStatistics) -> CrawlResult {
    tracing::info!("Crawl completed: {}", stats);
    session.into_result()
}
