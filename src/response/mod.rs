//! Response carrier module
//!
//! A [`Response`] is what one page asked for and got back: a snapshot of the
//! outbound request, a snapshot of the transport reply, and an optional typed
//! payload that later pages read to derive their own requests.
//!
//! # Payload lineage
//!
//! A chain is parameterized by a single payload type `T`, so the compiler
//! already keeps most chains homogeneous. [`AnyPayload`] opts back into
//! dynamic typing; its [`Lineage`] is the type of the wrapped value, and a
//! carrier refuses a payload whose lineage differs from the one already
//! established with [`crate::Error::PayloadTypeMismatch`].

mod carrier;
mod payload;

pub use carrier::{RawResponse, RequestRecord, Response};
pub use payload::{AnyPayload, Lineage, Payload};
