// Analyzer module - classification, retrieval, summarization and synthesis

pub mod classifier;
pub mod llm_client;
pub mod mock;
pub mod orchestrator;
pub mod perspective;
pub mod profile_builder;
pub mod prompts;
pub mod retriever;
pub mod scorer;
pub mod search_client;
pub mod summarizer;
pub mod synthesizer;

pub use classifier::{ClassificationSource, ProductClassifier};
pub use llm_client::{create_llm_client, LlmConfig, LlmProvider};
pub use orchestrator::AnalysisOrchestrator;
pub use perspective::PerspectiveRole;
pub use profile_builder::ProfileBuilder;
pub use prompts::PromptTemplate;
pub use retriever::EvidenceRetriever;
pub use scorer::MarketScorer;
pub use search_client::{SearchProvider, TavilySearchClient};
pub use summarizer::{parse_tariff_rate, Summarizer};
pub use synthesizer::RecommendationSynthesizer;

use crate::error::AdvisorError;
use std::future::Future;
use std::time::Duration;

/// Runs `fut` under `limit`, turning expiry into `AdvisorError::Timeout`.
pub(crate) async fn bounded<T, F>(operation: &str, limit: Duration, fut: F) -> Result<T, AdvisorError>
where
    F: Future<Output = Result<T, AdvisorError>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AdvisorError::Timeout {
            operation: operation.to_string(),
            seconds: limit.as_secs(),
        })?
}
