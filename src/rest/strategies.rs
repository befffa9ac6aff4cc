//! REST pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{
    check_stop_condition, count_records, extract_string, NextPage, StopCondition, Strategy,
};
use crate::response::Response;
use crate::types::StringMap;
use serde_json::Value;

static NULL: Value = Value::Null;

fn body_of(resp: &Response<Value>) -> &Value {
    resp.payload().unwrap_or(&NULL)
}

/// Read back a numeric query parameter the page was requested with
fn sent_param(resp: &Response<Value>, param: &str) -> Option<u32> {
    resp.request()?.query_param(param)?.parse().ok()
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (e.g., Stripe, Slack)
///
/// Uses a cursor value from the response to fetch the next page.
/// Common patterns:
/// - `?starting_after=obj_123`
/// - `?cursor=abc123`
#[derive(Debug, Clone)]
pub struct CursorStrategy {
    /// Query parameter name for cursor
    pub cursor_param: String,
    /// Path to extract cursor from response
    pub cursor_path: String,
    /// Path to the records array
    pub records_path: String,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl CursorStrategy {
    /// Create a new cursor strategy
    pub fn new(cursor_param: impl Into<String>, cursor_path: impl Into<String>) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            records_path: String::new(),
            stop_condition: StopCondition::Never,
        }
    }

    /// Set the records path
    #[must_use]
    pub fn records_at(mut self, path: impl Into<String>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }
}

impl Strategy for CursorStrategy {
    fn initial_params(&self) -> StringMap {
        StringMap::new()
    }

    fn next_page(&self, resp: &Response<Value>) -> NextPage {
        let body = body_of(resp);
        let records_count = count_records(body, &self.records_path);

        if check_stop_condition(&self.stop_condition, body, records_count) {
            return NextPage::Done;
        }

        match extract_string(body, &self.cursor_path) {
            Some(cursor) if !cursor.is_empty() => NextPage::with_param(&self.cursor_param, cursor),
            _ => NextPage::Done,
        }
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (e.g., SQL-style pagination)
///
/// Uses offset and limit parameters to paginate.
/// Common patterns:
/// - `?offset=100&limit=50`
/// - `?skip=100&take=50`
#[derive(Debug, Clone)]
pub struct OffsetStrategy {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of records per page
    pub limit_value: u32,
    /// Path to the records array
    pub records_path: String,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl OffsetStrategy {
    /// Create a new offset strategy
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value,
            records_path: String::new(),
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// Set the records path
    #[must_use]
    pub fn records_at(mut self, path: impl Into<String>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    fn params(&self, offset: u32) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.offset_param.clone(), offset.to_string());
        params.insert(self.limit_param.clone(), self.limit_value.to_string());
        params
    }
}

impl Strategy for OffsetStrategy {
    fn initial_params(&self) -> StringMap {
        self.params(0)
    }

    fn next_page(&self, resp: &Response<Value>) -> NextPage {
        let body = body_of(resp);
        let records_count = count_records(body, &self.records_path);

        if check_stop_condition(&self.stop_condition, body, records_count) {
            return NextPage::Done;
        }

        // A short page is the last one
        if records_count < self.limit_value as usize {
            return NextPage::Done;
        }

        let offset = sent_param(resp, &self.offset_param).unwrap_or(0);
        match offset.checked_add(self.limit_value) {
            Some(next) => NextPage::with_params(self.params(next)),
            None => NextPage::Done,
        }
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., traditional web pagination)
///
/// Uses page number parameter to paginate.
/// Common patterns:
/// - `?page=2`
/// - `?page=2&per_page=50`
#[derive(Debug, Clone)]
pub struct PageNumberStrategy {
    /// Query parameter name for page number
    pub page_param: String,
    /// First page number (usually 0 or 1)
    pub start_page: u32,
    /// Optional page size parameter name
    pub page_size_param: Option<String>,
    /// Page size value
    pub page_size: Option<u32>,
    /// Path to the records array
    pub records_path: String,
    /// Stop condition
    pub stop_condition: StopCondition,
}

impl PageNumberStrategy {
    /// Create a new page number strategy
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            page_size_param: None,
            page_size: None,
            records_path: String::new(),
            stop_condition: StopCondition::EmptyPage,
        }
    }

    /// Set page size parameter
    #[must_use]
    pub fn with_page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.page_size_param = Some(param.into());
        self.page_size = Some(size);
        self
    }

    /// Set the records path
    #[must_use]
    pub fn records_at(mut self, path: impl Into<String>) -> Self {
        self.records_path = path.into();
        self
    }

    /// Set stop condition
    #[must_use]
    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_condition = condition;
        self
    }

    fn params(&self, page: u32) -> StringMap {
        let mut params = StringMap::new();
        params.insert(self.page_param.clone(), page.to_string());
        if let (Some(param), Some(size)) = (&self.page_size_param, self.page_size) {
            params.insert(param.clone(), size.to_string());
        }
        params
    }
}

impl Strategy for PageNumberStrategy {
    fn initial_params(&self) -> StringMap {
        self.params(self.start_page)
    }

    fn next_page(&self, resp: &Response<Value>) -> NextPage {
        let body = body_of(resp);
        let records_count = count_records(body, &self.records_path);

        if check_stop_condition(&self.stop_condition, body, records_count) {
            return NextPage::Done;
        }

        // If we have a page size and got fewer records, we're done
        if let Some(size) = self.page_size {
            if records_count < size as usize {
                return NextPage::Done;
            }
        }

        let page = sent_param(resp, &self.page_param).unwrap_or(self.start_page);
        match page.checked_add(1) {
            Some(next) => NextPage::with_params(self.params(next)),
            None => NextPage::Done,
        }
    }
}

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 5988)
///
/// Extracts next page URL from the Link header.
/// Common in GitHub, GitLab APIs.
/// Format: `Link: <https://api.github.com/...?page=2>; rel="next", ...`
#[derive(Debug, Clone)]
pub struct LinkHeaderStrategy {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkHeaderStrategy {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl LinkHeaderStrategy {
    /// Create a new link header strategy
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

impl Strategy for LinkHeaderStrategy {
    fn initial_params(&self) -> StringMap {
        StringMap::new()
    }

    fn next_page(&self, resp: &Response<Value>) -> NextPage {
        resp.raw()
            .and_then(|raw| raw.get_header("link"))
            .and_then(|header| parse_link_header(header, &self.rel))
            .map_or(NextPage::Done, NextPage::with_url)
    }
}

/// Parse a Link header and extract the URL for the given rel
pub(crate) fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let mut url = None;
        let mut rel = None;

        for segment in part.trim().split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r.split_whitespace().any(|r| r == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination (URL in response body)
///
/// Extracts next page URL from a field in the response body.
/// Common patterns:
/// - `{ "next": "https://api.example.com/items?page=2" }`
/// - `{ "pagination": { "next_url": "..." } }`
#[derive(Debug, Clone)]
pub struct NextUrlStrategy {
    /// Path to extract next URL from response
    pub path: String,
}

impl NextUrlStrategy {
    /// Create a new next URL strategy
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Strategy for NextUrlStrategy {
    fn initial_params(&self) -> StringMap {
        StringMap::new()
    }

    fn next_page(&self, resp: &Response<Value>) -> NextPage {
        match extract_string(body_of(resp), &self.path) {
            Some(next_url) if !next_url.is_empty() => NextPage::with_url(next_url),
            _ => NextPage::Done,
        }
    }
}
