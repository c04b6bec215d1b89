use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid input: {0}")]
    InputInvalid(String),

    #[error("Classification ambiguous: model returned '{0}'")]
    ClassificationAmbiguous(String),

    #[error("Retrieval failed for {topic}: {reason}")]
    RetrievalFailure { topic: String, reason: String },

    #[error("Malformed numeric response: '{0}'")]
    MalformedNumericResponse(String),

    #[error("{operation} timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },

    #[error("LLM client error: {0}")]
    LlmClientError(String),

    #[error("Search client error: {0}")]
    SearchClientError(String),

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

impl AdvisorError {
    pub fn retrieval(topic: impl Into<String>, reason: impl ToString) -> Self {
        AdvisorError::RetrievalFailure {
            topic: topic.into(),
            reason: reason.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AdvisorError::InputInvalid(_) | AdvisorError::InvalidArguments(_) => 2,
            AdvisorError::ConfigError(_) | AdvisorError::ConfigParseError(_) => 4,
            _ => 1,
        }
    }
}
