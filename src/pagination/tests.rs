//! Tests for pagination module

use super::*;
use crate::error::{Error, ErrorKind};
use crate::response::{AnyPayload, Response};
use crate::types::{has_next_fn, request_fn, PageState};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Paginator over page numbers, stopping once `last` is reached
fn counting_paginator(last: u32, calls: Arc<AtomicUsize>) -> Paginator<u32> {
    Paginator::new()
        .with_subsequent_request(move |prev| {
            calls.fetch_add(1, Ordering::SeqCst);
            let n = prev.and_then(Response::payload).copied().unwrap_or(0);
            Ok(Response::from_payload(n + 1))
        })
        .with_has_next(move |resp| resp.payload().is_some_and(|n| *n < last))
}

fn first_request(prev: Option<&Response<u32>>) -> crate::Result<Response<u32>> {
    assert!(prev.is_none());
    Ok(Response::from_payload(0))
}

// ============================================================================
// Lazy Execution
// ============================================================================

#[test]
fn test_first_page_is_lazy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let paginator = Paginator::<u32>::new();

    let page = paginator.first_page(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Response::from_payload(1))
    });

    assert_eq!(page.state(), PageState::Unexecuted);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(page.response().unwrap().payload(), Some(&1));
    assert!(page.is_executed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_response_is_idempotent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let page = Paginator::<u32>::new().first_page(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Response::from_payload(9))
    });

    for _ in 0..5 {
        assert_eq!(page.response().unwrap().payload(), Some(&9));
    }
    assert!(std::ptr::eq(page.response().unwrap(), page.response().unwrap()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Chaining
// ============================================================================

#[test]
fn test_next_page_is_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(5, Arc::clone(&calls));
    let first = paginator.first_page(first_request);

    let a = first.next_page().unwrap().unwrap();
    let b = first.next_page().unwrap().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(a.response().unwrap().payload(), Some(&1));
}

#[test]
fn test_next_page_executes_successor_eagerly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(5, Arc::clone(&calls));
    let first = paginator.first_page(first_request);

    let second = first.next_page().unwrap().unwrap();
    assert!(second.is_executed());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_end_of_chain_is_none_not_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(1, Arc::clone(&calls));
    let first = paginator.first_page(first_request);

    let second = first.next_page().unwrap().unwrap();
    assert!(!second.has_next().unwrap());
    for _ in 0..3 {
        assert!(second.next_page().unwrap().is_none());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_default_has_next_stops_after_first_page() {
    let paginator = Paginator::<u32>::new()
        .with_subsequent_request(|_| panic!("subsequent request must not run"));
    let first = paginator.first_page(first_request);

    assert!(!first.has_next().unwrap());
    assert!(first.next_page().unwrap().is_none());
}

#[test]
fn test_prev_page_links() {
    let paginator = counting_paginator(3, Arc::new(AtomicUsize::new(0)));
    let first = paginator.first_page(first_request);

    assert!(first.prev_page().is_none());
    assert!(first.is_first());

    let second = first.next_page().unwrap().unwrap();
    let third = second.next_page().unwrap().unwrap();

    assert!(Arc::ptr_eq(&second.prev_page().unwrap(), &first));
    assert!(Arc::ptr_eq(&third.prev_page().unwrap(), &second));
    assert!(!third.is_first());
}

#[test]
fn test_last_page_keeps_whole_chain_reachable() {
    let paginator = counting_paginator(3, Arc::new(AtomicUsize::new(0)));
    let last = paginator.pages(first_request).last().unwrap().unwrap();

    assert!(!last.is_first());
    let mut payloads = Vec::new();
    let mut cursor = Some(last);
    while let Some(page) = cursor {
        payloads.push(*page.response().unwrap().payload().unwrap());
        cursor = page.prev_page();
    }
    assert_eq!(payloads, vec![3, 2, 1, 0]);
}

#[test]
fn test_successor_keeps_predecessor_alive() {
    let paginator = counting_paginator(3, Arc::new(AtomicUsize::new(0)));
    let first = paginator.first_page(first_request);
    let weak_first = Arc::downgrade(&first);
    let second = first.next_page().unwrap().unwrap();

    drop(first);
    let prev = second.prev_page().unwrap();
    assert!(Arc::ptr_eq(&prev, &weak_first.upgrade().unwrap()));
    assert_eq!(prev.response().unwrap().payload(), Some(&0));

    drop(prev);
    drop(second);
    assert!(weak_first.upgrade().is_none());
}

#[test]
fn test_dropped_successor_is_rebuilt_without_refetching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(5, Arc::clone(&calls));
    let first = paginator.first_page(first_request);

    let second = first.next_page().unwrap().unwrap();
    let third = second.next_page().unwrap().unwrap();
    assert_eq!(third.response().unwrap().payload(), Some(&2));
    drop(third);
    drop(second);

    let second = first.next_page().unwrap().unwrap();
    let third = second.next_page().unwrap().unwrap();
    assert_eq!(second.response().unwrap().payload(), Some(&1));
    assert_eq!(third.response().unwrap().payload(), Some(&2));
    assert!(Arc::ptr_eq(&third.prev_page().unwrap(), &second));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_long_chain_drops_without_overflow() {
    let paginator = counting_paginator(200_000, Arc::new(AtomicUsize::new(0)));
    let last = paginator.pages(first_request).last().unwrap().unwrap();
    assert_eq!(last.response().unwrap().payload(), Some(&200_000));
    drop(last);
}

#[test]
fn test_subsequent_request_receives_previous_response() {
    let paginator = Paginator::<String>::new()
        .with_subsequent_request(|prev| {
            let prev = prev.and_then(Response::payload).cloned().unwrap_or_default();
            Ok(Response::from_payload(format!("{prev}+")))
        })
        .with_has_next(|resp| resp.payload().is_some_and(|s| s.len() < 3));

    let payloads: Vec<String> = paginator
        .pages(|_| Ok(Response::from_payload("a".to_string())))
        .map(|page| page.unwrap().response().unwrap().payload().cloned().unwrap())
        .collect();

    assert_eq!(payloads, vec!["a", "a+", "a++"]);
}

// ============================================================================
// Configuration Errors
// ============================================================================

#[test]
fn test_missing_request_fn() {
    let page = Page::<u32>::new();
    let err = page.response().unwrap_err();
    assert!(matches!(err, Error::RequestFunctionMissing));
    assert_eq!(err.kind(), ErrorKind::ConfigurationMissing);
    assert!(!page.is_executed());
}

#[test]
fn test_missing_has_next_fn() {
    let mut page = Page::<u32>::new();
    page.set_request_fn(request_fn(|_| Ok(Response::from_payload(1))))
        .unwrap();

    let err = page.init().unwrap_err();
    assert!(matches!(err, Error::HasNextFunctionMissing));
}

#[test]
fn test_missing_subsequent_request_fn() {
    let paginator = Paginator::<u32>::new().with_has_next(|_| true);
    let first = paginator.first_page(first_request);

    let err = first.next_page().unwrap_err();
    assert!(matches!(err, Error::RequestFunctionMissing));
}

#[test]
fn test_page_built_from_scratch() {
    let mut page = Page::<u32>::new();
    page.set_request_fn(request_fn(|_| Ok(Response::from_payload(10))))
        .unwrap();
    page.set_next_page_request_fn(request_fn(|prev| {
        let n = prev.and_then(Response::payload).copied().unwrap_or(0);
        Ok(Response::from_payload(n + 10))
    }))
    .unwrap();
    page.set_has_next_fn(has_next_fn(|resp: &Response<u32>| {
        resp.payload().is_some_and(|n| *n < 30)
    }))
    .unwrap();

    let first = page.init().unwrap();
    let values: Vec<u32> = first
        .iter()
        .map(|page| *page.unwrap().response().unwrap().payload().unwrap())
        .collect();

    assert_eq!(values, vec![10, 20, 30]);
}

#[test]
fn test_setters_rejected_after_execution() {
    let mut page = Page::<u32>::new();
    page.set_request_fn(request_fn(|_| Ok(Response::from_payload(1))))
        .unwrap();
    page.set_has_next_fn(has_next_fn(|_: &Response<u32>| false))
        .unwrap();
    page.response().unwrap();

    let err = page
        .set_request_fn(request_fn(|_| Ok(Response::from_payload(2))))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::AlreadyExecuted {
            setting: "request_fn"
        }
    ));
    assert!(page
        .set_has_next_fn(has_next_fn(|_: &Response<u32>| true))
        .is_err());
    assert!(page
        .set_next_page_request_fn(request_fn(|_| Ok(Response::new())))
        .is_err());
    assert_eq!(page.response().unwrap().payload(), Some(&1));
}

// ============================================================================
// Request Failures
// ============================================================================

#[test]
fn test_request_error_propagates_verbatim() {
    let page = Paginator::<u32>::new().first_page(|_| Err(Error::http_status(503, "down")));

    match page.response().unwrap_err() {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "down");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(page.state(), PageState::Unexecuted);
}

#[test]
fn test_failed_successor_is_not_memoized() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let paginator = Paginator::<u32>::new()
        .with_subsequent_request(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(Error::other("transient"))
            } else {
                Ok(Response::from_payload(2))
            }
        })
        .with_has_next(|resp| resp.payload() == Some(&1));
    let first = paginator.first_page(|_| Ok(Response::from_payload(1)));

    let err = first.next_page().unwrap_err();
    assert_eq!(err.to_string(), "transient");

    let second = first.next_page().unwrap().unwrap();
    assert_eq!(second.response().unwrap().payload(), Some(&2));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failed_page_never_fabricates_success() {
    let page = Paginator::<u32>::new().first_page(|_| Err(Error::other("boom")));

    for _ in 0..3 {
        assert_eq!(page.response().unwrap_err().to_string(), "boom");
    }
    assert!(!page.is_executed());
}

// ============================================================================
// Payload Lineage Across Pages
// ============================================================================

#[test]
fn test_chain_rejects_payload_type_change() {
    let paginator = Paginator::<AnyPayload>::new()
        .with_subsequent_request(|_| Ok(Response::from_payload(AnyPayload::new(7u32))))
        .with_has_next(|_| true);
    let first = paginator.first_page(|_| Ok(Response::from_payload(AnyPayload::new("c1"))));

    let err = first.next_page().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadTypeMismatch);
}

#[test]
fn test_chain_accepts_same_payload_type() {
    let paginator = Paginator::<AnyPayload>::new()
        .with_subsequent_request(|prev| {
            let mut resp = prev.map(Response::create_response).unwrap_or_default();
            resp.set_payload(AnyPayload::new("c2"))?;
            Ok(resp)
        })
        .with_has_next(|resp| {
            resp.payload()
                .and_then(AnyPayload::downcast_ref::<&str>)
                .is_some_and(|s| *s == "c1")
        });
    let first = paginator.first_page(|_| Ok(Response::from_payload(AnyPayload::new("c1"))));

    let second = first.next_page().unwrap().unwrap();
    let cursor = second
        .response()
        .unwrap()
        .payload()
        .and_then(AnyPayload::downcast_ref::<&str>)
        .copied();
    assert_eq!(cursor, Some("c2"));
}

#[test]
fn test_untyped_page_does_not_reset_chain_type() {
    let paginator = Paginator::<AnyPayload>::new()
        .with_subsequent_request(|prev| match prev.and_then(Response::payload) {
            Some(_) => Ok(Response::new()),
            None => Ok(Response::from_payload(AnyPayload::new("string"))),
        })
        .with_has_next(|_| true);
    let first = paginator.first_page(|_| Ok(Response::from_payload(AnyPayload::new(1u8))));

    let second = first.next_page().unwrap().unwrap();
    assert!(second.response().unwrap().payload().is_none());

    match second.next_page().unwrap_err() {
        Error::PayloadTypeMismatch { expected, found } => {
            assert_eq!(expected, "u8");
            assert_eq!(found, "&str");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_untyped_response_after_typed_is_allowed() {
    let paginator = Paginator::<AnyPayload>::new()
        .with_subsequent_request(|_| Ok(Response::new()))
        .with_has_next(|resp| resp.payload().is_some());
    let first = paginator.first_page(|_| Ok(Response::from_payload(AnyPayload::new(1u8))));

    let second = first.next_page().unwrap().unwrap();
    assert!(second.response().unwrap().payload().is_none());
    assert!(second.next_page().unwrap().is_none());
}

// ============================================================================
// Iteration
// ============================================================================

#[test]
fn test_iterate_pages_visits_in_order() {
    let paginator = counting_paginator(3, Arc::new(AtomicUsize::new(0)));
    let mut seen = Vec::new();

    paginator
        .iterate_pages(first_request, |resp| {
            seen.push(*resp.payload().unwrap());
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, vec![0, 1, 2, 3]);
}

#[test]
fn test_iterate_pages_stops_on_visit_error() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(10, Arc::clone(&calls));
    let mut seen = Vec::new();

    let err = paginator
        .iterate_pages(first_request, |resp| {
            let n = *resp.payload().unwrap();
            seen.push(n);
            if n == 2 {
                return Err(Error::other("enough"));
            }
            Ok(())
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "enough");
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_iterate_pages_fails_fast_on_first_page() {
    let mut visited = 0;
    let err = Paginator::<u32>::new()
        .iterate_pages(
            |_| Err(Error::other("unreachable host")),
            |_| {
                visited += 1;
                Ok(())
            },
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "unreachable host");
    assert_eq!(visited, 0);
}

#[test]
fn test_pages_iterator_is_fused_after_error() {
    let paginator = Paginator::<u32>::new()
        .with_subsequent_request(|_| Err(Error::other("rate limited")))
        .with_has_next(|_| true);
    let mut pages = paginator.pages(first_request);

    assert!(pages.next().unwrap().is_ok());
    assert_eq!(
        pages.next().unwrap().unwrap_err().to_string(),
        "rate limited"
    );
    assert!(pages.next().is_none());
    assert!(pages.next().is_none());
}

#[test]
fn test_paginator_mints_independent_chains() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(2, Arc::clone(&calls));

    let a = paginator.first_page(first_request);
    let b = paginator.clone().first_page(first_request);
    let a2 = a.next_page().unwrap().unwrap();
    let b2 = b.next_page().unwrap().unwrap();

    assert!(!Arc::ptr_eq(&a2, &b2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Threading
// ============================================================================

#[test]
fn test_concurrent_next_page_runs_request_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let paginator = counting_paginator(5, Arc::clone(&calls));
    let first = paginator.first_page(first_request);
    first.response().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let first = Arc::clone(&first);
            std::thread::spawn(move || first.next_page().unwrap().unwrap())
        })
        .collect();
    let successors: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(successors.iter().all(|p| Arc::ptr_eq(p, &successors[0])));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
