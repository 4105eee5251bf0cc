//! Exa search API client
//!
//! Thin HTTP adapter implementing [`EvidenceSource`] against the Exa
//! search-and-contents endpoint.

use crate::evidence::{EvidenceHit, EvidenceSource, MAX_RENDERED_HITS};
use async_trait::async_trait;
use ctistream_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_ENDPOINT: &str = "https://api.exa.ai";
const API_KEY_VAR: &str = "EXA_API_KEY";

/// HTTP client for the Exa search API
#[derive(Debug, Clone)]
pub struct ExaSearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ExaSearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the API key from the environment; a missing key is a fatal
    /// configuration error raised before any I/O.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| Error::config(format!("{API_KEY_VAR} is not set")))?;
        if api_key.trim().is_empty() {
            return Err(Error::config(format!("{API_KEY_VAR} is empty")));
        }
        Ok(Self::new(api_key))
    }

    /// Override the API endpoint (tests, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    num_results: usize,
    contents: ContentsRequest,
}

#[derive(Debug, Serialize)]
struct ContentsRequest {
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    published_date: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[async_trait]
impl EvidenceSource for ExaSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<EvidenceHit>> {
        let request = SearchRequest {
            query,
            num_results: MAX_RENDERED_HITS,
            contents: ContentsRequest { summary: true },
        };

        let response = self
            .http
            .post(format!("{}/search", self.endpoint))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::evidence(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::evidence(format!("search returned {status}")));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::evidence(format!("malformed search response: {e}")))?;

        debug!(results = body.results.len(), "evidence search completed");
        Ok(body
            .results
            .into_iter()
            .map(|r| EvidenceHit {
                title: r.title.unwrap_or_else(|| "untitled".to_string()),
                url: r.url,
                published_date: r.published_date,
                summary: r.summary,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_endpoint_overrides_default() {
        let client = ExaSearchClient::new("key").with_endpoint("http://localhost:9200");
        assert_eq!(client.endpoint, "http://localhost:9200");
        assert_eq!(ExaSearchClient::new("key").endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn request_body_shape_matches_api() {
        let request = SearchRequest {
            query: "ransomware campaign",
            num_results: MAX_RENDERED_HITS,
            contents: ContentsRequest { summary: true },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "ransomware campaign");
        assert_eq!(json["numResults"], 5);
        assert_eq!(json["contents"]["summary"], true);
    }

    #[test]
    fn canned_response_deserializes_with_defaults() {
        let body = r#"{
            "results": [
                {
                    "title": "Vendor advisory",
                    "url": "https://example.com/a",
                    "publishedDate": "2025-09-02",
                    "summary": "Exploitation confirmed."
                },
                {"url": "https://example.com/b"}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(
            response.results[0].published_date.as_deref(),
            Some("2025-09-02")
        );
        assert!(response.results[1].title.is_none());
        assert!(response.results[1].summary.is_none());
    }

    #[test]
    fn empty_body_yields_no_results() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }
}
