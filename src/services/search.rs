// src/services/search.rs

//! Search provider client.
//!
//! Talks to SerpApi's Google engine and normalizes `organic_results` into
//! [`ResultRecord`]s.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{RawResult, ResultRecord, SearchConfig};
use crate::utils::http;

/// SerpApi reports an empty result page as an error; it is not one for us.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// A source of search results for a single query.
pub trait SearchProvider {
    /// Run one query and return its normalized results.
    fn search(&self, query: &str) -> Result<Vec<ResultRecord>>;
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<RawResult>,
    #[serde(default)]
    error: Option<String>,
}

/// SerpApi client for the Google engine.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    language: String,
    google_domain: String,
    max_results: usize,
}

impl SerpApiClient {
    /// Create a client. The key is checked by [`crate::config::Secrets`].
    pub fn new(config: &SearchConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            google_domain: config.google_domain.clone(),
            max_results: config.max_results_per_query,
        })
    }

    fn params(&self, query: &str) -> [(&'static str, String); 6] {
        [
            ("engine", "google".to_string()),
            ("q", query.to_string()),
            ("hl", self.language.clone()),
            ("google_domain", self.google_domain.clone()),
            ("num", self.max_results.to_string()),
            ("api_key", self.api_key.clone()),
        ]
    }
}

impl SearchProvider for SerpApiClient {
    fn search(&self, query: &str) -> Result<Vec<ResultRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::search(query, "empty query"));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.params(query))
            .send()
            .map_err(|e| AppError::search(query, e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AppError::search(query, e.without_url()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<SerpResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(AppError::search(query, format!("status {status}: {detail}")));
        }

        parse_results(query, &body, self.max_results)
    }
}

/// Parse a provider response body into at most `cap` records.
///
/// Hits without a link are dropped.
pub fn parse_results(query: &str, body: &str, cap: usize) -> Result<Vec<ResultRecord>> {
    let response: SerpResponse = serde_json::from_str(body)
        .map_err(|e| AppError::search(query, format!("invalid response: {e}")))?;

    if let Some(error) = response.error {
        if response.organic_results.is_empty() && error.contains(NO_RESULTS_MARKER) {
            return Ok(Vec::new());
        }
        return Err(AppError::search(query, error));
    }

    Ok(response
        .organic_results
        .into_iter()
        .take(cap)
        .filter_map(RawResult::into_record)
        .collect())
}
