use crate::url::is_http_scheme;
use crate::{UrlError, UrlResult};
use url::Url;

/// Turns the URL a caller submitted into the seed of a crawl
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the URL; reject if malformed
/// 3. Require an HTTP or HTTPS scheme and a host
/// 4. Remove the fragment
///
/// The path is kept as submitted. A trailing slash marks a directory, and
/// relative hrefs on that page resolve inside it.
///
/// # Examples
///
/// ```
/// use font_crawl::url::normalize_seed_url;
///
/// let url = normalize_seed_url(" https://example.com/blog/#latest ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/blog/");
/// ```
pub fn normalize_seed_url(raw: &str) -> UrlResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if !is_http_scheme(url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);

    Ok(url)
}
