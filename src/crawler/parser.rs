//! HTML queries over a loaded document
//!
//! This module extracts from a parsed page:
//! - The hrefs worth following (Link Extractor)
//! - The style sources the font extractor reads: the first `<style>` block,
//!   every inline `style` attribute and every linked stylesheet href
//! - The `<base href>` that relative hrefs resolve against

use scraper::{Html, Selector};

/// Style sources found on one page, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSources {
    /// Text content of the first `<style>` element, if it has any
    pub style_tag: Option<String>,

    /// Raw value of every `style="..."` attribute
    pub inline_styles: Vec<String>,

    /// `href` of every `<link rel="stylesheet">`
    pub stylesheet_hrefs: Vec<String>,
}

/// Returns true if an anchor href should be followed
///
/// # Link Rules
///
/// **Exclude:**
/// - empty hrefs
/// - the bare root path `/`
/// - in-page fragments (`#section`)
/// - absolute URLs (anything starting with `http`)
///
/// What remains are same-origin relative paths.
pub fn is_followable_href(href: &str) -> bool {
    !href.is_empty() && href != "/" && !href.starts_with('#') && !href.starts_with("http")
}

/// Extracts the followable anchor hrefs of a document
///
/// Document order is preserved and duplicates are kept; deduplication
/// against visited pages happens during traversal.
///
/// # Example
///
/// ```
/// use font_crawl::crawler::extract_links;
/// use scraper::Html;
///
/// let html = Html::parse_document(r##"<a href="/about">About</a><a href="#top">Top</a>"##);
/// assert_eq!(extract_links(&html), vec!["/about".to_string()]);
/// ```
pub fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter(|href| is_followable_href(href))
        .map(str::to_string)
        .collect()
}

/// The `href` of the first `<base>` element, if it has a non-empty one
pub fn base_href(document: &Html) -> Option<String> {
    let base_selector = Selector::parse("base[href]").ok()?;

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Collects the style sources of a document
pub fn collect_style_sources(document: &Html) -> StyleSources {
    StyleSources {
        style_tag: first_style_tag(document),
        inline_styles: inline_styles(document),
        stylesheet_hrefs: stylesheet_hrefs(document),
    }
}

/// Text of the first `<style>` element; None when absent or empty
fn first_style_tag(document: &Html) -> Option<String> {
    let style_selector = Selector::parse("style").ok()?;

    document
        .select(&style_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .filter(|text| !text.is_empty())
}

fn inline_styles(document: &Html) -> Vec<String> {
    let Ok(styled_selector) = Selector::parse("[style]") else {
        return Vec::new();
    };

    document
        .select(&styled_selector)
        .filter_map(|element| element.value().attr("style"))
        .filter(|style| !style.is_empty())
        .map(str::to_string)
        .collect()
}

fn stylesheet_hrefs(document: &Html) -> Vec<String> {
    let Ok(link_selector) = Selector::parse(r#"link[rel~="stylesheet"][href]"#) else {
        return Vec::new();
    };

    document
        .select(&link_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
