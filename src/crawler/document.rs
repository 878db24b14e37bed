//! Document loader
//!
//! Turns a page URL into a [`Document`]: the page is fetched, parsed,
//! serialized back to HTML, and the serialized HTML parsed again so that
//! every query runs against the normalized DOM rather than the raw source.
//! Scripts are never executed.
//!
//! The DOM itself is dropped before `load_document` returns. A `Document`
//! keeps only what the font and link extractors read, which keeps it `Send`
//! across the stylesheet fetches that follow.

use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::parser::{base_href, collect_style_sources, extract_links, StyleSources};
use crate::FontCrawlError;
use scraper::Html;
use url::Url;

/// Snapshot of one loaded page
#[derive(Debug, Clone)]
pub struct Document {
    url: Url,
    base: Url,
    text: String,
    styles: StyleSources,
    links: Vec<String>,
}

impl Document {
    /// Builds a document from raw HTML (both loads happen here)
    ///
    /// `url` is where the HTML was served from. Relative hrefs resolve
    /// against it, or against the page's `<base href>` when there is one.
    pub fn parse(url: Url, raw_html: &str) -> Self {
        let serialized = Html::parse_document(raw_html).html();
        let dom = Html::parse_document(&serialized);

        let base = base_href(&dom)
            .and_then(|href| url.join(&href).ok())
            .unwrap_or_else(|| url.clone());

        Self {
            url,
            base,
            styles: collect_style_sources(&dom),
            links: extract_links(&dom),
            text: serialized,
        }
    }

    /// The URL the document was served from, after redirects
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL relative links and stylesheet hrefs resolve against
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The serialized HTML of the page
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style_sources(&self) -> &StyleSources {
        &self.styles
    }

    /// Followable hrefs, in document order, not yet resolved
    pub fn links(&self) -> &[String] {
        &self.links
    }
}

/// Returns true if a Content-Type header names an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    essence == "text/html" || essence == "application/xhtml+xml"
}

/// Loads the page at `url` as a [`Document`]
///
/// The document keeps the final URL of the fetch, so a redirected page
/// resolves its hrefs against where it actually lives.
///
/// # Returns
///
/// * `Ok(Document)` - The page was fetched and is HTML (or untyped)
/// * `Err(FontCrawlError::CrawlFailed)` - The page was unreachable, answered
///   with an error status, or is not an HTML document
pub async fn load_document(fetcher: &Fetcher, url: &Url) -> Result<Document, FontCrawlError> {
    match fetcher.fetch(url.as_str()).await {
        FetchResult::Success {
            final_url,
            content_type,
            body,
            ..
        } => {
            if let Some(content_type) = content_type.as_deref() {
                if !is_html_content_type(content_type) {
                    return Err(FontCrawlError::CrawlFailed {
                        url: url.to_string(),
                        reason: format!("not an HTML document ({})", content_type),
                    });
                }
            }

            let served_from = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
            Ok(Document::parse(served_from, &body))
        }
        failure => Err(FontCrawlError::CrawlFailed {
            url: url.to_string(),
            reason: failure
                .failure_reason()
                .unwrap_or_else(|| "fetch failed".to_string()),
        }),
    }
}
