//! Error types for the crossword client.
//!
//! # Design
//! Validation problems are caught before a request is built and carry every
//! violation. Once a response is in hand, a non-200 status lands in `Http`
//! with the raw body, while a 200 whose envelope reports a failure lands in
//! `Remote` with the service's own message.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by `CrosswordClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request broke one or more parameter rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The server returned a status other than 200.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response envelope reported an error or carried no data.
    #[error("service error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Remote { code: Option<u16>, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
