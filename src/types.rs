//! Common types used throughout pagechain
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::Result;
use crate::response::Response;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Callbacks
// ============================================================================

/// Produces a page's response from the previous page's response.
///
/// The first page of a chain receives `None`.
pub type RequestFn<T> = Arc<dyn Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync>;

/// Decides, from a page's own response, whether a successor page exists.
pub type HasNextFn<T> = Arc<dyn Fn(&Response<T>) -> bool + Send + Sync>;

/// Wrap a closure as a [`RequestFn`]
pub fn request_fn<T, F>(f: F) -> RequestFn<T>
where
    F: Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`HasNextFn`]
pub fn has_next_fn<T, F>(f: F) -> HasNextFn<T>
where
    F: Fn(&Response<T>) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Page State
// ============================================================================

/// Execution state of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// The page's request has not completed successfully yet
    #[default]
    Unexecuted,
    /// The page holds its response and has-next flag
    Executed,
}
