use crate::url::is_http_scheme;
use url::Url;

/// Resolves an href found on `base` to an absolute, fetchable URL
///
/// Returns None if the href cannot be joined onto `base` or resolves to
/// something other than HTTP(S). The fragment is dropped so that
/// `/about#team` and `/about` count as the same page.
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if !is_http_scheme(resolved.scheme()) {
        return None;
    }

    resolved.set_fragment(None);
    Some(resolved)
}
