//! RIPE database full-text search access
//!
//! This module holds the transport seam ([`RegistryClient`]) together with
//! response decoding ([`response`]) and field extraction ([`extract`]).
//!
//! # Example
//!
//! ```rust,ignore
//! use ripeq::lens::registry::{RegistryClient, UreqClient};
//! use ripeq::lens::registry::response::ResultPage;
//!
//! let client = UreqClient::new(ripeq::config::DEFAULT_API_URL);
//! let raw = client.fetch("\"EXAMPLE-NET\"", 0, 1)?;
//! let page = ResultPage::decode(&raw)?;
//! println!("{} matches", page.num_found);
//! ```

pub mod extract;
pub mod response;

use anyhow::{Context, Result};
use tracing::debug;

pub use extract::{extract, Record, INETNUM_FIELD};
pub use response::{ResponseFormat, ResultDoc, ResultPage};

/// Undecoded answer of the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Value of the `Content-Type` header (empty if absent)
    pub content_type: String,
    /// Response body
    pub body: String,
}

/// Issues full-text search requests against the registry
pub trait RegistryClient {
    /// Fetch `rows` results of `query` starting at offset `start`
    fn fetch(&self, query: &str, start: u64, rows: u64) -> Result<RawResponse>;
}

/// [`RegistryClient`] backed by a blocking `ureq` agent
#[derive(Debug, Clone)]
pub struct UreqClient {
    api_url: String,
}

impl UreqClient {
    /// Create a client for the search endpoint at `api_url`
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
        }
    }

    /// The search endpoint this client talks to
    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }
}

impl RegistryClient for UreqClient {
    fn fetch(&self, query: &str, start: u64, rows: u64) -> Result<RawResponse> {
        debug!("GET {} q={} start={} rows={}", self.api_url, query, start, rows);

        let mut resp = ureq::get(&self.api_url)
            .query("facet", "true")
            .query("format", "xml")
            .query("hl", "true")
            .query("q", query)
            .query("start", start.to_string())
            .query("rows", rows.to_string())
            .query("wt", "json")
            .call()
            .with_context(|| format!("Request failed for start={}", start))?;

        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = resp
            .body_mut()
            .read_to_string()
            .context("failed to read response body")?;

        debug!("received {} bytes ({})", body.len(), content_type);
        Ok(RawResponse { content_type, body })
    }
}

/// Wrap a search string in double quotes so the registry matches it as a phrase
pub fn phrase_query(query: &str) -> String {
    format!("\"{}\"", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_query() {
        assert_eq!(phrase_query("Example GmbH"), "\"Example GmbH\"");
    }

    #[test]
    fn test_client_keeps_url() {
        let client = UreqClient::new("https://example.net/select");
        assert_eq!(client.api_url(), "https://example.net/select");
    }
}
