//! Fuel price API error types.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::domain::ValidationError;

use super::convert::ConversionError;

/// Errors that can occur when talking to the fuel price service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error.
    ///
    /// Raised for non-2xx statuses, for exception text embedded in a 200
    /// body, and for rejected price submissions. `status` and `headers` are
    /// always those of the real response.
    #[error("{status}: {message}")]
    Response {
        status: StatusCode,
        headers: Box<HeaderMap>,
        message: String,
    },

    /// A row was received but its contents could not be understood
    #[error("malformed row: {0}")]
    Conversion(#[from] ConversionError),

    /// Client could not be constructed from its configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Input was rejected before sending a request
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// The HTTP status carried by a response error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Response { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }
}
