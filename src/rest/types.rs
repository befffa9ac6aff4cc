//! REST pagination types and traits
//!
//! Defines the strategy abstraction used by [`super::RestPager`].

use crate::response::Response;
use crate::types::StringMap;
use serde_json::Value;

/// Where the next page lives
#[derive(Debug, Clone, PartialEq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: StringMap,
        /// Optional new URL (for next_url and link header pagination)
        url: Option<String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: StringMap) -> Self {
        Self::Continue {
            query_params: params,
            url: None,
        }
    }

    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = StringMap::new();
        params.insert(key.into(), value.into());
        Self::with_params(params)
    }

    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue {
            query_params: StringMap::new(),
            url: Some(url.into()),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Stop conditions checked before looking for the next page
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StopCondition {
    /// Stop when page is empty (no records)
    #[default]
    EmptyPage,

    /// Stop when a field has a specific value
    Field {
        /// Dotted path to the field
        path: String,
        /// Expected value to stop
        value: Value,
    },

    /// Only the strategy's own signal ends the chain
    Never,
}

impl StopCondition {
    /// Create a field-based stop condition
    pub fn field(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Field {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// Core trait for REST pagination strategies
pub trait Strategy: Send + Sync {
    /// Query parameters for the first request
    fn initial_params(&self) -> StringMap;

    /// Decide where the page after `resp` lives
    ///
    /// `resp` carries the decoded JSON body as payload, the raw reply, and the
    /// request record it was fetched with.
    fn next_page(&self, resp: &Response<Value>) -> NextPage;
}

/// Check whether a stop condition holds for a page
pub fn check_stop_condition(condition: &StopCondition, body: &Value, records_count: usize) -> bool {
    match condition {
        StopCondition::EmptyPage => records_count == 0,
        StopCondition::Field { path, value } => extract_path(body, path) == Some(value),
        StopCondition::Never => false,
    }
}

/// Count the records of a page
///
/// `records_path` points at an array; an empty path means the body itself.
/// Anything that is not an array counts as zero records.
pub fn count_records(body: &Value, records_path: &str) -> usize {
    extract_path(body, records_path)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Walk a dotted path (`$.data.items`, `data.-1.id`) into a JSON value
///
/// Numeric segments index arrays; negative ones count from the end.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let path = path.strip_prefix('$').unwrap_or(path);
    if path.is_empty() {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(items) => {
                let index: i64 = part.parse().ok()?;
                let index = if index < 0 {
                    items.len().checked_sub(index.unsigned_abs() as usize)?
                } else {
                    index as usize
                };
                items.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Extract a scalar at a path as a string
pub fn extract_string(value: &Value, path: &str) -> Option<String> {
    match extract_path(value, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
