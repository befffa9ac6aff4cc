//! Error types for pagechain
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors returned by a caller-supplied request function travel through the
//! page chain untouched, so request functions build their failures out of
//! these same variants.

use thiserror::Error;

/// The main error type for pagechain
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("request function not set")]
    RequestFunctionMissing,

    #[error("has next function not set")]
    HasNextFunctionMissing,

    #[error("Cannot change '{setting}' after the page has executed")]
    AlreadyExecuted { setting: &'static str },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("metadata type mismatch: expected {expected}, found {found}")]
    PayloadTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A page or paginator was used before it was fully configured
    ConfigurationMissing,
    /// The request function (or the transport beneath it) failed
    RequestFailed,
    /// A payload did not match the type already established for its chain
    PayloadTypeMismatch,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a free-form error, typically from inside a request function
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RequestFunctionMissing
            | Error::HasNextFunctionMissing
            | Error::AlreadyExecuted { .. }
            | Error::Config { .. } => ErrorKind::ConfigurationMissing,
            Error::PayloadTypeMismatch { .. } => ErrorKind::PayloadTypeMismatch,
            _ => ErrorKind::RequestFailed,
        }
    }

    /// Check if this error came from a misconfigured page or paginator
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::ConfigurationMissing
    }
}

/// Result type alias for pagechain
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
