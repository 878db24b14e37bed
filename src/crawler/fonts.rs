//! Font extractor
//!
//! Finds font-family names in three kinds of style source and records each
//! new name in the crawl session:
//! - inline `style` attributes, counted against the whole serialized page
//! - linked stylesheets, fetched one at a time in document order
//! - the first `<style>` block of the page
//!
//! Stylesheets are walked as a tree of tokens and nested blocks (via
//! `cssparser`), so declarations inside `@media`, `@supports`, `@font-face`
//! or nested rules are found as well.

use crate::crawler::document::Document;
use crate::crawler::fetcher::Fetcher;
use crate::output::PageFontReport;
use crate::state::{normalize_font_name, CrawlSession};
use crate::url::resolve_href;
use crate::CssError;
use cssparser::{Delimiter, ParseError, ParseErrorKind, Parser, ParserInput, Token};

/// Why a stylesheet was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Malformation {
    BadString,
    BadUrl,
    UnbalancedBracket,
}

impl Malformation {
    fn describe(self) -> &'static str {
        match self {
            Self::BadString => "unterminated string",
            Self::BadUrl => "invalid url()",
            Self::UnbalancedBracket => "unbalanced closing bracket",
        }
    }
}

type WalkResult<'i, T> = Result<T, ParseError<'i, Malformation>>;

fn to_css_error(error: ParseError<'_, Malformation>) -> CssError {
    let reason = match error.kind {
        ParseErrorKind::Custom(malformation) => malformation.describe().to_string(),
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };

    CssError::Malformed {
        line: error.location.line + 1,
        column: error.location.column,
        reason,
    }
}

/// Number of non-whitespace characters in `text`; None for empty text
///
/// # Example
///
/// ```
/// use font_crawl::crawler::character_count;
///
/// assert_eq!(character_count("a b\tc\n"), Some(3));
/// assert_eq!(character_count(""), None);
/// ```
pub fn character_count(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }

    Some(text.chars().filter(|c| !c.is_whitespace()).count() as u64)
}

/// Lists every font-family name declared in a stylesheet, in source order
///
/// Names are normalized but not deduplicated.
pub fn font_families_in_css(css: &str) -> Result<Vec<String>, CssError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut families = Vec::new();

    walk_rules(&mut parser, &mut families).map_err(to_css_error)?;

    Ok(families)
}

/// Splits a font-family value (`"Helvetica Neue", Arial, sans-serif`) into
/// its normalized family names
pub fn font_families_in_value(value: &str) -> Result<Vec<String>, CssError> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);

    family_list(&mut parser).map_err(to_css_error)
}

/// Walks the rules and declarations of one block (or the whole sheet)
fn walk_rules<'i, 't>(parser: &mut Parser<'i, 't>, families: &mut Vec<String>) -> WalkResult<'i, ()> {
    let mut statement_start = true;
    let mut property: Option<String> = None;

    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };

        match token {
            Token::Ident(name) if statement_start => {
                property = Some(name.to_ascii_lowercase());
                statement_start = false;
            }
            Token::Colon if property.is_some() => {
                if property.take().as_deref() == Some("font-family") {
                    let found =
                        parser.parse_until_after(Delimiter::Semicolon, |value| family_list(value))?;
                    families.extend(found);
                    statement_start = true;
                }
            }
            Token::Semicolon => {
                property = None;
                statement_start = true;
            }
            Token::CurlyBracketBlock => {
                parser.parse_nested_block(|block| walk_rules(block, families))?;
                property = None;
                statement_start = true;
            }
            Token::BadString(_) => return Err(parser.new_custom_error(Malformation::BadString)),
            Token::BadUrl(_) => return Err(parser.new_custom_error(Malformation::BadUrl)),
            Token::CloseCurlyBracket | Token::CloseParenthesis | Token::CloseSquareBracket => {
                return Err(parser.new_custom_error(Malformation::UnbalancedBracket))
            }
            _ => {
                property = None;
                statement_start = false;
            }
        }
    }
}

/// Reads a comma-separated family list up to the end of the value
///
/// Quoted strings are one family each; adjacent identifiers form one family
/// joined by single spaces. `!important` ends the list.
fn family_list<'i, 't>(parser: &mut Parser<'i, 't>) -> WalkResult<'i, Vec<String>> {
    let mut families = Vec::new();
    let mut words: Vec<String> = Vec::new();

    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::QuotedString(value) => {
                flush_words(&mut words, &mut families);
                push_family(&mut families, &value);
            }
            Token::Ident(word) => words.push(word.to_string()),
            Token::Comma => flush_words(&mut words, &mut families),
            Token::Delim('!') => break,
            Token::BadString(_) => return Err(parser.new_custom_error(Malformation::BadString)),
            Token::BadUrl(_) => return Err(parser.new_custom_error(Malformation::BadUrl)),
            Token::CloseCurlyBracket | Token::CloseParenthesis | Token::CloseSquareBracket => {
                return Err(parser.new_custom_error(Malformation::UnbalancedBracket))
            }
            // var(), numbers and the like never name a family
            _ => {}
        }
    }

    flush_words(&mut words, &mut families);
    Ok(families)
}

fn flush_words(words: &mut Vec<String>, families: &mut Vec<String>) {
    if !words.is_empty() {
        push_family(families, &words.join(" "));
        words.clear();
    }
}

fn push_family(families: &mut Vec<String>, raw: &str) {
    let name = normalize_font_name(raw);
    if !name.is_empty() {
        families.push(name);
    }
}

/// Records fonts declared in inline `style` attribute values
///
/// Each value is split into `;`-separated declarations; every `font-family`
/// declaration contributes its family list. All fonts found this way carry
/// the character count of the whole serialized document.
///
/// Returns the number of newly recorded fonts.
pub fn extract_inline_fonts<S: AsRef<str>>(
    style_values: &[S],
    session: &mut CrawlSession,
    document_text: &str,
) -> usize {
    let mut document_count: Option<Option<u64>> = None;
    let mut recorded = 0;

    for style in style_values {
        for declaration in style.as_ref().split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            if !property.trim().eq_ignore_ascii_case("font-family") {
                continue;
            }

            let families = match font_families_in_value(value) {
                Ok(families) => families,
                Err(e) => {
                    tracing::warn!("Skipping inline font-family {:?}: {}", value.trim(), e);
                    continue;
                }
            };

            let count = *document_count.get_or_insert_with(|| character_count(document_text));
            for family in families {
                if session.record_font(&family, count) {
                    recorded += 1;
                }
            }
        }
    }

    recorded
}

/// Records fonts declared in a stylesheet or `<style>` block
///
/// Every font found carries the character count of `css` itself. A
/// malformed stylesheet records nothing.
///
/// Returns the number of newly recorded fonts.
pub fn parse_stylesheet_fonts(css: &str, session: &mut CrawlSession) -> Result<usize, CssError> {
    let families = font_families_in_css(css)?;
    let count = character_count(css);

    Ok(families
        .iter()
        .filter(|family| session.record_font(family, count))
        .count())
}

/// Runs the font extractor over every style source of a loaded page
///
/// Order: inline styles, linked stylesheets (sequentially, in document
/// order, resolved against the document's base URL), then the first
/// `<style>` block. A stylesheet that cannot be
/// fetched or parsed is skipped; nothing here fails the page.
pub async fn get_page_fonts(
    fetcher: &Fetcher,
    document: &Document,
    session: &mut CrawlSession,
) -> PageFontReport {
    let sources = document.style_sources();
    let mut report = PageFontReport::default();

    report.fonts_recorded += extract_inline_fonts(&sources.inline_styles, session, document.text());

    for href in &sources.stylesheet_hrefs {
        let Some(sheet_url) = resolve_href(document.base_url(), href) else {
            tracing::debug!("Unresolvable stylesheet href {:?} on {}", href, document.url());
            report.stylesheets_unavailable += 1;
            continue;
        };

        match fetcher.fetch(sheet_url.as_str()).await.into_body() {
            Some(css) => record_stylesheet(&css, sheet_url.as_str(), session, &mut report),
            None => {
                tracing::debug!("Stylesheet {} unavailable", sheet_url);
                report.stylesheets_unavailable += 1;
            }
        }
    }

    if let Some(style_tag) = &sources.style_tag {
        record_stylesheet(style_tag, "<style>", session, &mut report);
    }

    report
}

fn record_stylesheet(
    css: &str,
    source: &str,
    session: &mut CrawlSession,
    report: &mut PageFontReport,
) {
    match parse_stylesheet_fonts(css, session) {
        Ok(recorded) => {
            tracing::debug!("{} new fonts from {}", recorded, source);
            report.stylesheets_parsed += 1;
            report.fonts_recorded += recorded;
        }
        Err(e) => {
            tracing::warn!("Skipping stylesheet {}: {}", source, e);
            report.stylesheets_malformed += 1;
        }
    }
}
