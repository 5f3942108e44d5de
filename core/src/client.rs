//! Stateless HTTP request builder and response parser for the crossword API.
//!
//! # Design
//! `CrosswordClient` holds only a base URL and a list of extra headers and
//! carries no mutable state between calls. Generation is split into
//! `build_generate`, which validates and marshals a `CrosswordRequest` into an
//! `HttpRequest`, and `parse_generate`, which unwraps the service envelope
//! from an `HttpResponse`. The caller executes the actual HTTP round-trip,
//! keeping the core deterministic and free of I/O dependencies.

use tracing::{debug, warn};
use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::encode_query;
use crate::types::{ApiResponse, CrosswordRequest, ResponseData};

/// Production host of the crossword endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.apiverve.com";

/// Path of the crossword endpoint, relative to the base URL.
pub const CROSSWORD_PATH: &str = "/v1/crossword";

/// Synchronous, stateless client for the crossword API.
///
/// Credentials are not handled here; callers attach whatever headers their
/// account needs (for example `x-api-key`) with [`CrosswordClient::with_header`].
#[derive(Debug, Clone)]
pub struct CrosswordClient {
    base_url: String,
    headers: Vec<(String, String)>,
}

impl Default for CrosswordClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CrosswordClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    /// Attach a header to every request this client builds.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_generate(&self, request: &CrosswordRequest) -> Result<HttpRequest, ApiError> {
        request.validate()?;

        let mut url = Url::parse(&format!("{}{CROSSWORD_PATH}", self.base_url))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        let query = encode_query(&request.to_query_params());
        url.set_query((!query.is_empty()).then_some(query.as_str()));

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        headers.extend(self.headers.iter().cloned());

        debug!(url = %url, "built crossword request");
        Ok(HttpRequest {
            url: url.into(),
            headers,
        })
    }

    pub fn parse_generate(&self, response: HttpResponse) -> Result<ResponseData, ApiError> {
        if response.status != 200 {
            warn!(status = response.status, "crossword request failed");
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let envelope: ApiResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;

        match envelope {
            ApiResponse {
                status,
                data: Some(data),
                ..
            } if status == "ok" => Ok(data),
            ApiResponse { status, error, code, .. } => {
                let message = error.unwrap_or_else(|| format!("status \"{status}\" with no data"));
                warn!(?code, %message, "crossword service reported an error");
                Err(ApiError::Remote { code, message })
            }
        }
    }
}
