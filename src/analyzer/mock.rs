//! Scripted stand-ins for the generative and search services, used by tests
//! and offline runs.

use crate::analyzer::llm_client::LlmProvider;
use crate::analyzer::search_client::SearchProvider;
use crate::error::AdvisorError;
use crate::models::{EvidenceRecord, SearchDepth};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

enum Reply {
    Text(String),
    Fail(String),
}

/// Answers prompts by the first rule whose needle appears in the prompt.
pub struct MockLlm {
    rules: Vec<(String, Reply)>,
    fallback: Reply,
    delay: Option<Duration>,
    prompts: Mutex<Vec<String>>,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlm {
    /// Unmatched prompts fail.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Reply::Fail("no scripted response".to_string()),
            delay: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt fails.
    pub fn failing() -> Self {
        Self::unavailable("LLM service unavailable")
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let mut mock = Self::new();
        mock.fallback = Reply::Fail(reason.into());
        mock
    }

    pub fn respond_when(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Reply::Text(response.into())));
        self
    }

    pub fn fail_when(mut self, needle: impl Into<String>) -> Self {
        self.rules
            .push((needle.into(), Reply::Fail("scripted failure".to_string())));
        self
    }

    pub fn otherwise(mut self, response: impl Into<String>) -> Self {
        self.fallback = Reply::Text(response.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or(0)
    }

    fn reply_for(&self, prompt: &str) -> Result<String, AdvisorError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply)
            .unwrap_or(&self.fallback);

        match reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(reason) => Err(AdvisorError::LlmClientError(reason.clone())),
        }
    }
}

impl LlmProvider for MockLlm {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply_for(prompt)
        })
    }

    fn get_model_name(&self) -> &str {
        "mock-model"
    }

    fn get_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }
}

enum Results {
    Records(Vec<EvidenceRecord>),
    Fail,
}

/// Answers queries by the first rule whose needle appears in the query.
pub struct MockSearch {
    rules: Vec<(String, Results)>,
    fallback: Results,
    queries: Mutex<Vec<(String, usize, SearchDepth)>>,
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearch {
    /// Unmatched queries return no results.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Results::Records(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every query fails.
    pub fn failing() -> Self {
        let mut mock = Self::new();
        mock.fallback = Results::Fail;
        mock
    }

    pub fn results_when(mut self, needle: impl Into<String>, contents: &[&str]) -> Self {
        let records = contents.iter().map(|c| EvidenceRecord::new(*c)).collect();
        self.rules.push((needle.into(), Results::Records(records)));
        self
    }

    pub fn fail_when(mut self, needle: impl Into<String>) -> Self {
        self.rules.push((needle.into(), Results::Fail));
        self
    }

    pub fn otherwise(mut self, contents: &[&str]) -> Self {
        self.fallback = Results::Records(contents.iter().map(|c| EvidenceRecord::new(*c)).collect());
        self
    }

    pub fn queries(&self) -> Vec<(String, usize, SearchDepth)> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    fn results_for(&self, query: &str, max_results: usize, depth: SearchDepth) -> Result<Vec<EvidenceRecord>, AdvisorError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((query.to_string(), max_results, depth));
        }

        let results = self
            .rules
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, results)| results)
            .unwrap_or(&self.fallback);

        match results {
            Results::Records(records) => Ok(records.iter().take(max_results).cloned().collect()),
            Results::Fail => Err(AdvisorError::SearchClientError(format!(
                "scripted failure for '{}'",
                query
            ))),
        }
    }
}

impl SearchProvider for MockSearch {
    fn search<'a>(
        &'a self,
        query: &'a str,
        max_results: usize,
        depth: SearchDepth,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<EvidenceRecord>, AdvisorError>> + Send + 'a>> {
        Box::pin(async move { self.results_for(query, max_results, depth) })
    }
}
