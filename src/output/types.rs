use serde::{Deserialize, Serialize};

/// Fonts found by one crawl, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub ok: bool,
    pub font_families: Vec<FontUsage>,
}

impl CrawlResult {
    /// An empty, successful result
    pub fn new() -> Self {
        Self {
            ok: true,
            font_families: Vec::new(),
        }
    }

    /// Names of the recorded fonts, in discovery order
    pub fn names(&self) -> Vec<&str> {
        self.font_families.iter().map(|f| f.name.as_str()).collect()
    }

    /// Looks up a recorded font by its normalized name
    pub fn get(&self, name: &str) -> Option<&FontUsage> {
        self.font_families.iter().find(|f| f.name == name)
    }
}

impl Default for CrawlResult {
    fn default() -> Self {
        Self::new()
    }
}

/// One font-family name and the size of the text it was declared in
///
/// `character_count` is the non-whitespace length of the HTML or CSS source
/// the declaration came from, not of the text rendered in that font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontUsage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
}

/// `{ ok: false, reason }` answer of the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub reason: String,
}

impl ErrorResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: reason.into(),
        }
    }

    /// The answer given when the seed page itself cannot be fetched
    pub fn http_status(status_code: u16) -> Self {
        Self::new(format!("Page responded with HTTP status {}", status_code))
    }
}
