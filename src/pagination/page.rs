//! Lazy page node
//!
//! A page keeps its predecessor alive and hands out its successor on demand.
//! Execution results form their own forward-linked list, so a successor that
//! every caller has dropped can be rebuilt without repeating its request.

use super::iter::Pages;
use crate::error::{Error, Result};
use crate::response::{Lineage, Response};
use crate::types::{HasNextFn, PageState, RequestFn};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tracing::{debug, trace};

/// What one successful execution produced
struct Executed<T> {
    response: Response<T>,
    has_next: bool,
    /// First payload type seen on this page or any page before it
    lineage: Option<Lineage>,
    next: OnceCell<Arc<Executed<T>>>,
}

impl<T> Drop for Executed<T> {
    // Unlink iteratively so long chains do not overflow the stack
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(executed) = next {
            next = match Arc::try_unwrap(executed) {
                Ok(mut executed) => executed.next.take(),
                Err(_) => None,
            };
        }
    }
}

/// One fetch in a pagination chain
pub struct Page<T> {
    request_fn: Option<RequestFn<T>>,
    next_request_fn: Option<RequestFn<T>>,
    has_next_fn: Option<HasNextFn<T>>,
    prev: Option<Arc<Page<T>>>,
    executed: OnceCell<Arc<Executed<T>>>,
    successor: Mutex<Weak<Page<T>>>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::linked(None, None, None, None)
    }
}

impl<T> Drop for Page<T> {
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(page) = prev {
            prev = match Arc::try_unwrap(page) {
                Ok(mut page) => page.prev.take(),
                Err(_) => None,
            };
        }
    }
}

impl<T> Page<T> {
    /// Create an unconfigured first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a first page from its three callbacks
    pub(crate) fn first(
        request_fn: RequestFn<T>,
        next_request_fn: Option<RequestFn<T>>,
        has_next_fn: HasNextFn<T>,
    ) -> Self {
        Self::linked(Some(request_fn), next_request_fn, Some(has_next_fn), None)
    }

    fn linked(
        request_fn: Option<RequestFn<T>>,
        next_request_fn: Option<RequestFn<T>>,
        has_next_fn: Option<HasNextFn<T>>,
        prev: Option<Arc<Page<T>>>,
    ) -> Self {
        Self {
            request_fn,
            next_request_fn,
            has_next_fn,
            prev,
            executed: OnceCell::new(),
            successor: Mutex::new(Weak::new()),
        }
    }

    // ------------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------------

    /// Set the function that fetches this page
    pub fn set_request_fn(&mut self, f: RequestFn<T>) -> Result<()> {
        self.ensure_unexecuted("request_fn")?;
        self.request_fn = Some(f);
        Ok(())
    }

    /// Set the function every later page in the chain fetches with
    pub fn set_next_page_request_fn(&mut self, f: RequestFn<T>) -> Result<()> {
        self.ensure_unexecuted("next_request_fn")?;
        self.next_request_fn = Some(f);
        Ok(())
    }

    /// Set the continuation predicate
    pub fn set_has_next_fn(&mut self, f: HasNextFn<T>) -> Result<()> {
        self.ensure_unexecuted("has_next_fn")?;
        self.has_next_fn = Some(f);
        Ok(())
    }

    fn ensure_unexecuted(&self, setting: &'static str) -> Result<()> {
        if self.is_executed() {
            return Err(Error::AlreadyExecuted { setting });
        }
        Ok(())
    }

    /// Execute now and share the page
    pub fn init(self) -> Result<Arc<Self>> {
        let page = Arc::new(self);
        page.execute()?;
        Ok(page)
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    /// This page's response, executing the request on first access
    pub fn response(&self) -> Result<&Response<T>> {
        Ok(&self.execute()?.response)
    }

    /// Whether a successor exists, executing the request on first access
    pub fn has_next(&self) -> Result<bool> {
        Ok(self.execute()?.has_next)
    }

    /// The successor page, or `None` at the end of the chain
    ///
    /// The successor's request runs once; while any caller holds the
    /// successor, later calls return the same instance. If its request fails,
    /// nothing is recorded and the next call tries again.
    pub fn next_page(self: &Arc<Self>) -> Result<Option<Arc<Self>>> {
        let executed = self.execute()?;
        if !executed.has_next {
            trace!("No next page");
            return Ok(None);
        }

        let mut successor = self.successor.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(page) = successor.upgrade() {
            return Ok(Some(page));
        }

        let page = Arc::new(Self::linked(
            self.next_request_fn.clone(),
            self.next_request_fn.clone(),
            self.has_next_fn.clone(),
            Some(Arc::clone(self)),
        ));
        let next = executed
            .next
            .get_or_try_init(|| page.run().map(Arc::new))?;
        page.executed.get_or_init(|| Arc::clone(next));

        *successor = Arc::downgrade(&page);
        debug!("Linked next page");
        Ok(Some(page))
    }

    /// The page this one was derived from, `None` only for the first page
    pub fn prev_page(&self) -> Option<Arc<Self>> {
        self.prev.clone()
    }

    /// Whether this page starts its chain
    pub fn is_first(&self) -> bool {
        self.prev.is_none()
    }

    /// Execution state
    pub fn state(&self) -> PageState {
        if self.executed.get().is_some() {
            PageState::Executed
        } else {
            PageState::Unexecuted
        }
    }

    /// Whether the request has completed successfully
    pub fn is_executed(&self) -> bool {
        self.state() == PageState::Executed
    }

    /// Iterate from this page to the end of the chain
    pub fn iter(self: &Arc<Self>) -> Pages<T> {
        Pages::new(Arc::clone(self))
    }

    // ------------------------------------------------------------------------
    // Execution
    // ------------------------------------------------------------------------

    fn execute(&self) -> Result<&Executed<T>> {
        let executed = self.executed.get_or_try_init(|| self.run().map(Arc::new))?;
        Ok(executed.as_ref())
    }

    fn run(&self) -> Result<Executed<T>> {
        let request_fn = self
            .request_fn
            .as_ref()
            .ok_or(Error::RequestFunctionMissing)?;

        let prev = match &self.prev {
            Some(page) => Some(page.execute()?),
            None => None,
        };

        debug!(first = prev.is_none(), "Executing page request");
        let response = request_fn(prev.map(|executed| &executed.response))?;

        let has_next_fn = self
            .has_next_fn
            .as_ref()
            .ok_or(Error::HasNextFunctionMissing)?;

        let inherited = prev.and_then(|executed| executed.lineage);
        response.check_lineage(inherited)?;
        let lineage = response.lineage().or(inherited);

        let has_next = has_next_fn(&response);
        trace!(has_next, "Page executed");

        Ok(Executed {
            response,
            has_next,
            lineage,
            next: OnceCell::new(),
        })
    }
}

impl<T> fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("state", &self.state())
            .field("is_first", &self.is_first())
            .field("has_request_fn", &self.request_fn.is_some())
            .field("has_next_request_fn", &self.next_request_fn.is_some())
            .field("has_has_next_fn", &self.has_next_fn.is_some())
            .field(
                "has_successor",
                &self
                    .executed
                    .get()
                    .is_some_and(|executed| executed.next.get().is_some()),
            )
            .finish_non_exhaustive()
    }
}
