use crate::analyzer::bounded;
use crate::analyzer::llm_client::{strip_code_fence, LlmProvider};
use crate::analyzer::prompts::PromptTemplate;
use crate::config::ReferenceTables;
use crate::error::AdvisorError;
use crate::models::{CategoryCode, ProductQuery};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How a category code was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    Model,
    KeywordTable,
    Default,
}

/// Maps a product to a 6-digit category code: model inference first, then
/// the keyword table, then the configured default. Never fails.
pub struct ProductClassifier {
    llm: Arc<dyn LlmProvider>,
    reference: Arc<ReferenceTables>,
    default_code: CategoryCode,
    timeout: Duration,
}

impl ProductClassifier {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        reference: Arc<ReferenceTables>,
        default_code: CategoryCode,
        timeout: Duration,
    ) -> Self {
        Self {
            llm,
            reference,
            default_code,
            timeout,
        }
    }

    pub async fn classify(&self, product: &ProductQuery) -> CategoryCode {
        self.classify_with_source(product).await.0
    }

    pub async fn classify_with_source(&self, product: &ProductQuery) -> (CategoryCode, ClassificationSource) {
        match self.infer(product).await {
            Ok(code) => {
                info!(product = product.name(), code = %code, "classified by model");
                return (code, ClassificationSource::Model);
            }
            Err(e) => warn!(product = product.name(), "model classification unusable: {}", e),
        }

        self.fallback(product)
    }

    async fn infer(&self, product: &ProductQuery) -> Result<CategoryCode, AdvisorError> {
        let prompt = PromptTemplate::build_classification_prompt(product, &self.reference.hs_table_for_prompt());
        debug!("classification prompt: {}", prompt);

        let response = bounded("classification", self.timeout, self.llm.generate(&prompt)).await?;
        parse_category_response(&response)
            .ok_or_else(|| AdvisorError::ClassificationAmbiguous(response.trim().to_string()))
    }

    /// Keyword table, then the default code.
    pub fn fallback(&self, product: &ProductQuery) -> (CategoryCode, ClassificationSource) {
        if let Some(code) = self
            .reference
            .lookup_hs_code(product.name())
            .and_then(CategoryCode::parse)
        {
            info!(product = product.name(), code = %code, "classified by keyword table");
            return (code, ClassificationSource::KeywordTable);
        }

        info!(product = product.name(), code = %self.default_code, "using default category code");
        (self.default_code.clone(), ClassificationSource::Default)
    }
}

/// Accepts a response only if, after trimming whitespace, code fences and
/// surrounding quotes, it is exactly six ASCII digits.
pub fn parse_category_response(response: &str) -> Option<CategoryCode> {
    let unfenced = strip_code_fence(response);
    let candidate = unfenced.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();
    CategoryCode::parse(candidate)
}
