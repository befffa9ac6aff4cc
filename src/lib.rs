//! # pagechain
//!
//! Lazy, linked page chains for walking server-paginated APIs.
//!
//! A [`pagination::Paginator`] hands out the first [`pagination::Page`] of a
//! chain. Each page runs its request the first time its response is observed,
//! and derives its successor on demand from its own response. The caller never
//! writes "fetch next page" bookkeeping; it supplies a request function, a
//! has-next predicate, and walks.
//!
//! ## Features
//!
//! - **Lazy Pages**: A page's request runs at most once, on first access
//! - **Memoized Links**: Successors are fetched once; a page keeps its predecessor alive
//! - **Typed Payloads**: One payload type per chain, checked at compile time,
//!   or at runtime through [`response::AnyPayload`]
//! - **REST Strategies**: Cursor, offset, page number, Link header, next URL
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagechain::http::{HttpClient, HttpClientConfig};
//! use pagechain::rest::{CursorStrategy, RestPager};
//! use std::sync::Arc;
//!
//! fn main() -> pagechain::Result<()> {
//!     let client = HttpClient::with_config(HttpClientConfig::default())?;
//!     let pager = RestPager::new(
//!         Arc::new(client),
//!         "https://api.example.com/items",
//!         CursorStrategy::new("cursor", "next_cursor").records_at("items"),
//!     );
//!
//!     pager.iterate(|body| {
//!         println!("{body}");
//!         Ok(())
//!     })
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Paginator<T>  subsequent request fn + has-next predicate    │
//! │        │ first_page(first request fn)                        │
//! │        ▼                                                     │
//! │  Page 0 ──weak──▶ Page 1 ──weak──▶ Page 2 ──▶ ... (None)     │
//! │         ◀─owns───        ◀─owns───                           │
//! │  each page: OnceCell<Arc<(Response<T>, has_next, lineage)>>  │
//! └──────────────────────────────────────────────────────────────┘
//!          ▲ request fns built by           ▲ transport
//!     rest::RestPager + Strategy        http::HttpClient
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document enum variant fields before publishing

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Per-page response carrier
pub mod response;

/// Pages, paginator, and chain iteration
pub mod pagination;

/// Blocking HTTP transport
pub mod http;

/// REST pagination strategies
pub mod rest;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use pagination::{Page, Pages, Paginator};
pub use response::{AnyPayload, Payload, Response};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
