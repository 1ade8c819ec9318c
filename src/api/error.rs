//! Error types for the status API boundary.
//!
//! [`ApiError`] covers the transport: a non-2xx reply, a network-layer
//! failure, or a body that is not JSON at all. [`ResponseError`] covers
//! the shape of a decoded payload and is produced by
//! [`check_response`](super::response::check_response); each rejection is
//! a distinct kind so callers and tests can tell them apart.

use thiserror::Error;

/// Errors raised while fetching the raw status payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint answered with a non-2xx status code.
    #[error("endpoint {url} is unavailable, API response code: {status}")]
    Endpoint { url: String, status: u16 },

    /// Network-layer failure (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body of a 2xx reply was not valid JSON.
    #[error("failed to decode API response: {0}")]
    Decode(String),
}

/// Errors raised while validating a decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// The payload was `null` or an empty object.
    #[error("API response is empty")]
    Empty,

    /// The payload (or a record inside it) does not have the expected shape.
    #[error("malformed API response: {0}")]
    Malformed(String),

    /// The payload is an object but lacks a required key.
    #[error("API response is missing the {0:?} field")]
    MissingField(&'static str),
}
