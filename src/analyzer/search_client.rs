use crate::error::AdvisorError;
use crate::models::{EvidenceRecord, SearchDepth};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

/// Web search service: one query in, ordered result records out.
pub trait SearchProvider: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a str,
        max_results: usize,
        depth: SearchDepth,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<EvidenceRecord>, AdvisorError>> + Send + 'a>>;
}

#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
    include_raw_content: bool,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    results: Vec<EvidenceRecord>,
}

/// Tavily-compatible JSON search API client.
pub struct TavilySearchClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TavilySearchClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self, AdvisorError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn execute(
        &self,
        query: &str,
        max_results: usize,
        depth: SearchDepth,
    ) -> Result<Vec<EvidenceRecord>, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdvisorError::SearchClientError("search API key not configured".to_string())
        })?;

        let body = TavilySearchRequest {
            api_key,
            query,
            max_results,
            search_depth: depth.as_str(),
            include_raw_content: false,
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::SearchClientError(format!(
                "search service returned HTTP {}",
                status.as_u16()
            )));
        }

        let payload: TavilySearchResponse = response.json().await?;
        debug!(query, results = payload.results.len(), "search completed");

        let mut results = payload.results;
        results.truncate(max_results);
        Ok(results)
    }
}

impl SearchProvider for TavilySearchClient {
    fn search<'a>(
        &'a self,
        query: &'a str,
        max_results: usize,
        depth: SearchDepth,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<EvidenceRecord>, AdvisorError>> + Send + 'a>> {
        Box::pin(self.execute(query, max_results, depth))
    }
}
