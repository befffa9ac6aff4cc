//! REST pagination module
//!
//! Supports: Cursor, Offset, Page Number, Link Header, Next URL
//!
//! # Overview
//!
//! A [`Strategy`] reads one page's JSON body, headers, and recorded query
//! to decide where the next page lives. [`RestPager`] turns a strategy into
//! the request function and has-next predicate of a
//! [`crate::pagination::Paginator`] over `serde_json::Value` payloads, using
//! [`crate::http::HttpClient`] as transport.
//!
//! Strategies are stateless: the position of the current page (offset, page
//! number) is read back from the query its request was sent with.

mod pager;
mod strategies;
mod types;

pub use pager::RestPager;
pub use strategies::{
    CursorStrategy, LinkHeaderStrategy, NextUrlStrategy, OffsetStrategy, PageNumberStrategy,
};
pub use types::{
    check_stop_condition, count_records, extract_path, extract_string, NextPage, StopCondition,
    Strategy,
};
