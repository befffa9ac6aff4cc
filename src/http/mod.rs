//! HTTP client module
//!
//! The transport collaborator for request functions: one blocking call in,
//! one [`crate::response::RequestRecord`] and [`crate::response::RawResponse`]
//! snapshot out.
//!
//! # Features
//!
//! - **Base URL**: Relative paths are joined onto a configured base
//! - **Default Headers**: Applied to every request
//! - **Status Classification**: 4xx/5xx replies become [`crate::Error::HttpStatus`]
//!
//! Retries and rate limiting are deliberately absent; a request function that
//! wants them wraps the client itself.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
