//! Synchronous API client core for the Crossword Generator service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `CrosswordRequest` declares its query parameters once through
//!   `RequestSchema`; the marshaler (`query`) and the validator
//!   (`validation`) both interpret that one declaration.
//! - `CrosswordClient` is stateless; it holds only a base URL and extra
//!   headers.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - Response DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod formats;
pub mod http;
pub mod query;
pub mod schema;
pub mod types;
pub mod validation;

pub use client::{CrosswordClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use formats::StringFormat;
pub use http::{HttpRequest, HttpResponse};
pub use query::{encode_query, to_query_params};
pub use schema::{ParamField, ParamType, ParamValue, RequestSchema, ValidationRule};
pub use types::{ApiResponse, Clue, CrosswordRequest, GridRow, ImageData, ResponseData, GRID_WIDTH};
pub use validation::{validate, ValidationError};
