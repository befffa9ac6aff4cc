//! Pagination module
//!
//! Pages, the paginator that mints them, and an iterator over a chain.
//!
//! # Overview
//!
//! A chain starts with one [`Page`] built by a [`Paginator`]. The page does not
//! run its request until something observes its response. Asking a page for
//! its successor evaluates the has-next flag stored alongside its response;
//! when the flag is set, the successor is created, linked back to its
//! predecessor, and executed. Its response is kept with the predecessor's, so
//! asking again never repeats the request. A page keeps its predecessor alive.
//!
//! ```rust
//! use pagechain::pagination::Paginator;
//! use pagechain::response::Response;
//!
//! let paginator = Paginator::<u32>::new()
//!     .with_subsequent_request(|prev| {
//!         let n = prev.and_then(Response::payload).copied().unwrap_or(0);
//!         Ok(Response::from_payload(n + 1))
//!     })
//!     .with_has_next(|resp| resp.payload().is_some_and(|n| *n < 3));
//!
//! let mut seen = Vec::new();
//! paginator
//!     .iterate_pages(
//!         |_| Ok(Response::from_payload(1)),
//!         |resp| {
//!             seen.extend(resp.payload().copied());
//!             Ok(())
//!         },
//!     )
//!     .unwrap();
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```
//!
//! # Threading
//!
//! Execution goes through write-once cells and successor creation is
//! serialized per page, so a page shared across threads still runs each
//! request at most once on success.
//! Nothing is fetched in the background.

mod iter;
mod page;
mod paginator;

pub use iter::Pages;
pub use page::Page;
pub use paginator::Paginator;

#[cfg(test)]
mod tests;
