//! Iterator over a page chain

use super::page::Page;
use crate::error::Result;
use std::iter::FusedIterator;
use std::sync::Arc;

enum Cursor<T> {
    Start(Arc<Page<T>>),
    After(Arc<Page<T>>),
    Done,
}

/// Walks a chain page by page
///
/// Yields each executed page. The first error is yielded once and ends the
/// iteration. Pages behind the cursor are released unless the caller keeps
/// them.
pub struct Pages<T> {
    cursor: Cursor<T>,
}

impl<T> Pages<T> {
    pub(crate) fn new(start: Arc<Page<T>>) -> Self {
        Self {
            cursor: Cursor::Start(start),
        }
    }
}

impl<T> Iterator for Pages<T> {
    type Item = Result<Arc<Page<T>>>;

    fn next(&mut self) -> Option<Self::Item> {
        match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start(page) => {
                if let Err(e) = page.response() {
                    return Some(Err(e));
                }
                self.cursor = Cursor::After(Arc::clone(&page));
                Some(Ok(page))
            }
            Cursor::After(page) => match page.next_page() {
                Ok(Some(next)) => {
                    self.cursor = Cursor::After(Arc::clone(&next));
                    Some(Ok(next))
                }
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            },
            Cursor::Done => None,
        }
    }
}

impl<T> FusedIterator for Pages<T> {}
