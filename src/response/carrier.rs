//! The per-page result carrier

use super::payload::{Lineage, Payload};
use crate::error::{Error, Result};
use crate::types::{JsonValue, Method, StringMap};
use serde::de::DeserializeOwned;

/// Snapshot of an outbound call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestRecord {
    /// HTTP method
    pub method: Method,
    /// Absolute URL as sent, which may carry a query of its own
    pub url: String,
    /// Query parameters added on top of the URL
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// JSON body, if any
    pub body: Option<JsonValue>,
}

impl RequestRecord {
    /// Create a record for a method and URL
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Look up a query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// Snapshot of a transport reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    /// Status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: StringMap,
    /// Body text
    pub body: String,
}

impl RawResponse {
    /// Create a reply with a status and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: StringMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header, case-insensitively
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<D: DeserializeOwned>(&self) -> Result<D> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// What one page asked for and got
///
/// A response is assembled by a request function and moved into its page;
/// from then on the page only lends it out by shared reference.
#[derive(Debug, Clone)]
pub struct Response<T> {
    request: Option<RequestRecord>,
    raw: Option<RawResponse>,
    payload: Option<T>,
    lineage: Option<Lineage>,
}

impl<T> Default for Response<T> {
    fn default() -> Self {
        Self {
            request: None,
            raw: None,
            payload: None,
            lineage: None,
        }
    }
}

impl<T> Response<T> {
    /// Create an empty carrier
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the request record
    #[must_use]
    pub fn with_request(mut self, request: RequestRecord) -> Self {
        self.request = Some(request);
        self
    }

    /// Attach the transport reply
    #[must_use]
    pub fn with_raw(mut self, raw: RawResponse) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The request that produced this response
    pub fn request(&self) -> Option<&RequestRecord> {
        self.request.as_ref()
    }

    /// The transport reply
    pub fn raw(&self) -> Option<&RawResponse> {
        self.raw.as_ref()
    }

    /// The typed payload
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Consume the carrier, keeping only the payload
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// Payload type established for this carrier's lineage
    pub fn lineage(&self) -> Option<Lineage> {
        self.lineage
    }

    /// Derive a fresh carrier for the next request in the same lineage
    ///
    /// The new carrier has no request, reply, or payload, but it remembers the
    /// payload type so that [`Response::set_payload`] can reject a different one.
    pub fn create_response(&self) -> Response<T> {
        Response {
            lineage: self.lineage,
            ..Default::default()
        }
    }

    /// Decode the raw body as JSON
    pub fn json<D: DeserializeOwned>(&self) -> Result<D> {
        self.raw
            .as_ref()
            .ok_or_else(|| Error::config("response has no raw body"))?
            .json()
    }

    /// Fail if this carrier's lineage conflicts with `established`
    pub(crate) fn check_lineage(&self, established: Option<Lineage>) -> Result<()> {
        match (established, self.lineage) {
            (Some(expected), Some(found)) if expected != found => {
                Err(Error::PayloadTypeMismatch {
                    expected: expected.type_name(),
                    found: found.type_name(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl<T: Payload> Response<T> {
    /// Create a carrier holding a payload
    pub fn from_payload(payload: T) -> Self {
        Self {
            lineage: Some(payload.lineage()),
            payload: Some(payload),
            ..Default::default()
        }
    }

    /// Record a payload, establishing the lineage if none is set yet
    pub fn set_payload(&mut self, payload: T) -> Result<()> {
        let lineage = payload.lineage();
        if let Some(expected) = self.lineage {
            if expected != lineage {
                return Err(Error::PayloadTypeMismatch {
                    expected: expected.type_name(),
                    found: lineage.type_name(),
                });
            }
        }
        self.lineage = Some(lineage);
        self.payload = Some(payload);
        Ok(())
    }

    /// Builder form of [`Response::set_payload`]
    pub fn with_payload(mut self, payload: T) -> Result<Self> {
        self.set_payload(payload)?;
        Ok(self)
    }
}
