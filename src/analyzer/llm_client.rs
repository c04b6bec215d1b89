use crate::analyzer::prompts::PromptTemplate;
use crate::error::AdvisorError;
use rig::client::CompletionClient;
use rig::completion::{AssistantContent, CompletionModel};
use rig::providers::{anthropic, gemini, openai};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model_name: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Generative text service: one prompt in, one block of text out.
pub trait LlmProvider: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>>;
    fn get_model_name(&self) -> &str;
    fn get_timeout(&self) -> Duration;
}

/// Strips a surrounding markdown code fence, if the model added one.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(rest) = trimmed.strip_prefix("```") {
        let body = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest,
        };
        return body.trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}

pub struct RigLlmClient {
    config: LlmConfig,
    provider: RigProvider,
}

enum RigProvider {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
}

impl RigLlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, AdvisorError> {
        let provider = create_provider(&config)?;
        Ok(Self { config, provider })
    }

    async fn make_api_request(&self, prompt: &str) -> Result<String, AdvisorError> {
        let system_prompt = PromptTemplate::build_system_prompt();
        let model_name = provider_model_name(&self.config.model_name);

        match &self.provider {
            RigProvider::OpenAI(client) => {
                let model = client.completion_model(model_name);
                self.send_completion_request(model, prompt, system_prompt).await
            }
            RigProvider::Anthropic(client) => {
                let model = client.completion_model(model_name);
                self.send_completion_request(model, prompt, system_prompt).await
            }
            RigProvider::Gemini(client) => {
                let model = client.completion_model(model_name);
                self.send_completion_request(model, prompt, system_prompt).await
            }
        }
    }

    async fn send_completion_request<M: CompletionModel>(
        &self,
        model: M,
        prompt: &str,
        system_prompt: String,
    ) -> Result<String, AdvisorError> {
        let mut builder = model.completion_request(prompt).preamble(system_prompt);

        // Reasoning models reject an explicit temperature
        if let Some(temp) = self.config.temperature {
            if !self.config.model_name.starts_with("gpt-5") && !self.config.model_name.starts_with("o1") {
                builder = builder.temperature(temp as f64);
            }
        }

        if let Some(max_tokens) = self.config.max_tokens {
            builder = builder.max_tokens(max_tokens as u64);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AdvisorError::LlmClientError(format!("Request failed: {}", e)))?;

        let mut extracted_text = String::new();
        for content in response.choice.iter() {
            if let AssistantContent::Text(text_content) = content {
                extracted_text.push_str(&text_content.text);
            }
        }

        if extracted_text.trim().is_empty() {
            return Err(AdvisorError::LlmClientError(
                "LLM response missing text".to_string(),
            ));
        }

        Ok(extracted_text)
    }
}

impl LlmProvider for RigLlmClient {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>> {
        Box::pin(async move {
            let start_time = std::time::Instant::now();
            let text = self.make_api_request(prompt).await?;
            debug!(
                model = %self.config.model_name,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                chars = text.len(),
                "LLM call completed"
            );
            Ok(text.trim().to_string())
        })
    }

    fn get_model_name(&self) -> &str {
        &self.config.model_name
    }

    fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_seconds)
    }
}

/// Stands in when no client could be created; every call fails with the
/// creation error so the pipeline falls back to its defaults.
pub struct UnavailableLlm {
    model_name: String,
    reason: String,
}

impl UnavailableLlm {
    pub fn new(model_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            reason: reason.into(),
        }
    }
}

impl LlmProvider for UnavailableLlm {
    fn generate<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>> {
        Box::pin(async move { Err(AdvisorError::LlmClientError(self.reason.clone())) })
    }

    fn get_model_name(&self) -> &str {
        &self.model_name
    }

    fn get_timeout(&self) -> Duration {
        Duration::ZERO
    }
}

fn create_provider(config: &LlmConfig) -> Result<RigProvider, AdvisorError> {
    let model_name = config.model_name.trim();

    if is_openai_model(model_name) {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| AdvisorError::LlmClientError("OpenAI API key not found".to_string()))?;

        Ok(RigProvider::OpenAI(openai::Client::new(&api_key)))
    } else if is_claude_model(model_name) {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| AdvisorError::LlmClientError("Anthropic API key not found".to_string()))?;

        Ok(RigProvider::Anthropic(anthropic::Client::new(&api_key)))
    } else if is_gemini_model(model_name) {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| AdvisorError::LlmClientError("Gemini API key not found".to_string()))?;

        Ok(RigProvider::Gemini(gemini::Client::new(&api_key)))
    } else {
        Err(AdvisorError::LlmClientError(format!(
            "Unsupported model '{}'. Use OpenAI (gpt-*), Anthropic (claude-*), or Gemini (gemini-*) models",
            model_name
        )))
    }
}

pub fn create_llm_client(config: LlmConfig) -> Result<Box<dyn LlmProvider>, AdvisorError> {
    let client = RigLlmClient::new(config)?;
    Ok(Box::new(client))
}

/// Model name as the provider expects it, without any `vendor/` routing prefix.
fn provider_model_name(model: &str) -> &str {
    let model = model.trim();
    ["openai/", "anthropic/", "gemini/"]
        .iter()
        .find_map(|prefix| model.strip_prefix(prefix))
        .unwrap_or(model)
}

fn is_openai_model(model: &str) -> bool {
    let candidate = model.strip_prefix("openai/").unwrap_or(model);
    let candidate = candidate.strip_prefix("ft:").unwrap_or(candidate);

    candidate.starts_with("gpt-")
        || candidate.starts_with("chatgpt-")
        || candidate.starts_with("o1")
        || candidate.starts_with("o3")
        || candidate.starts_with("o4")
}

fn is_claude_model(model: &str) -> bool {
    let candidate = model.strip_prefix("anthropic/").unwrap_or(model);
    candidate.starts_with("claude-")
}

fn is_gemini_model(model: &str) -> bool {
    let candidate = model.strip_prefix("gemini/").unwrap_or(model);
    candidate.starts_with("gemini-")
}
