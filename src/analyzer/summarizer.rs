use crate::analyzer::bounded;
use crate::analyzer::llm_client::{strip_code_fence, LlmProvider};
use crate::analyzer::prompts::PromptTemplate;
use crate::error::AdvisorError;
use crate::models::EvidenceSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Condenses one evidence set into a short answer to a topic instruction.
pub struct Summarizer {
    llm: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// `None` when there is no evidence, the call fails or times out, or the
    /// model answers with nothing.
    pub async fn summarize(&self, evidence: &EvidenceSet, instruction: &str) -> Option<String> {
        if evidence.is_empty() {
            debug!(country = %evidence.country, "no evidence to summarize");
            return None;
        }

        let operation = operation_name(evidence);
        let prompt = PromptTemplate::build_summary_prompt(evidence, instruction);

        match bounded(&operation, self.timeout, self.llm.generate(&prompt)).await {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                warn!(country = %evidence.country, "{} returned an empty response", operation);
                None
            }
            Err(e) => {
                warn!(country = %evidence.country, "{} failed: {}", operation, e);
                None
            }
        }
    }
}

fn operation_name(evidence: &EvidenceSet) -> String {
    if evidence.label.is_empty() {
        "summary".to_string()
    } else {
        format!("{} summary", evidence.label)
    }
}

/// Strict tariff parse: one optional trailing `%`, otherwise digits and `.` only.
pub fn try_parse_tariff_rate(text: &str) -> Result<f64, AdvisorError> {
    let unfenced = strip_code_fence(text);
    let trimmed = unfenced.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);

    let malformed = || AdvisorError::MalformedNumericResponse(trimmed.to_string());

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(malformed());
    }

    let rate: f64 = number.parse().map_err(|_| malformed())?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(malformed());
    }
    Ok(rate)
}

pub fn parse_tariff_rate(text: &str, default: f64) -> f64 {
    try_parse_tariff_rate(text).unwrap_or(default)
}
