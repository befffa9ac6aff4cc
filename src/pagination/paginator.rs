//! Paginator: shared callbacks and chain construction

use super::iter::Pages;
use super::page::Page;
use crate::error::Result;
use crate::response::Response;
use crate::types::{HasNextFn, RequestFn};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Holds the callbacks shared by every page after the first
///
/// A paginator can start any number of independent chains. Only the first
/// page's request is supplied per chain, since it has no previous response
/// to read from.
pub struct Paginator<T> {
    subsequent_request: Option<RequestFn<T>>,
    has_next: Option<HasNextFn<T>>,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self {
            subsequent_request: None,
            has_next: None,
        }
    }
}

impl<T> Clone for Paginator<T> {
    fn clone(&self) -> Self {
        Self {
            subsequent_request: self.subsequent_request.clone(),
            has_next: self.has_next.clone(),
        }
    }
}

impl<T: 'static> Paginator<T> {
    /// Create a paginator with no callbacks
    ///
    /// Without a has-next predicate every chain stops after its first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request function for every page after the first
    #[must_use]
    pub fn with_subsequent_request<F>(mut self, f: F) -> Self
    where
        F: Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync + 'static,
    {
        self.subsequent_request = Some(Arc::new(f));
        self
    }

    /// Set the continuation predicate
    #[must_use]
    pub fn with_has_next<F>(mut self, f: F) -> Self
    where
        F: Fn(&Response<T>) -> bool + Send + Sync + 'static,
    {
        self.has_next = Some(Arc::new(f));
        self
    }

    /// Set the request function for every page after the first
    pub fn set_common_subsequent_request_fn(&mut self, f: RequestFn<T>) -> &mut Self {
        self.subsequent_request = Some(f);
        self
    }

    /// Set the continuation predicate
    pub fn set_common_has_next_fn(&mut self, f: HasNextFn<T>) -> &mut Self {
        self.has_next = Some(f);
        self
    }

    fn common_has_next(&self) -> HasNextFn<T> {
        match &self.has_next {
            Some(f) => Arc::clone(f),
            None => Arc::new(|_: &Response<T>| false),
        }
    }

    /// Start a chain
    ///
    /// The returned page has not executed yet; its request runs the first
    /// time its response is observed.
    pub fn first_page<F>(&self, first_request: F) -> Arc<Page<T>>
    where
        F: Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync + 'static,
    {
        Arc::new(Page::first(
            Arc::new(first_request),
            self.subsequent_request.clone(),
            self.common_has_next(),
        ))
    }

    /// Start a chain and iterate over its pages
    pub fn pages<F>(&self, first_request: F) -> Pages<T>
    where
        F: Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync + 'static,
    {
        self.first_page(first_request).iter()
    }

    /// Visit every response in a new chain, in order
    ///
    /// Stops at the first error, whether it comes from a fetch or from
    /// `visit`, and returns it unchanged.
    pub fn iterate_pages<F, V>(&self, first_request: F, mut visit: V) -> Result<()>
    where
        F: Fn(Option<&Response<T>>) -> Result<Response<T>> + Send + Sync + 'static,
        V: FnMut(&Response<T>) -> Result<()>,
    {
        let mut page = self.first_page(first_request);
        let mut visited = 0usize;

        loop {
            visit(page.response()?)?;
            visited += 1;

            match page.next_page()? {
                Some(next) => page = next,
                None => break,
            }
        }

        debug!(pages = visited, "Pagination complete");
        Ok(())
    }
}

impl<T> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("has_subsequent_request", &self.subsequent_request.is_some())
            .field("has_has_next", &self.has_next.is_some())
            .finish()
    }
}
