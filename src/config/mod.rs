pub mod reference;

pub use reference::{HsMapping, ReferenceTables};

use crate::analyzer::llm_client::LlmConfig;
use crate::error::AdvisorError;
use crate::models::{CategoryCode, SearchDepth, SearchTopic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model_name: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Read from the environment, never from the config file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            temperature: Some(0.3),
            max_tokens: Some(2048),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultLimits {
    pub tariff: usize,
    pub market_size: usize,
    pub competitors: usize,
    pub partners: usize,
    pub perspective: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            tariff: 5,
            market_size: 3,
            competitors: 5,
            partners: 10,
            perspective: 2,
        }
    }
}

impl ResultLimits {
    pub fn for_topic(&self, topic: SearchTopic) -> usize {
        match topic {
            SearchTopic::Tariff => self.tariff,
            SearchTopic::MarketSize => self.market_size,
            SearchTopic::Competitors => self.competitors,
            SearchTopic::Partners => self.partners,
        }
    }

    fn all(&self) -> [(&'static str, usize); 5] {
        [
            ("tariff", self.tariff),
            ("market_size", self.market_size),
            ("competitors", self.competitors),
            ("partners", self.partners),
            ("perspective", self.perspective),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub base_url: String,
    pub depth: SearchDepth,
    pub limits: ResultLimits,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            depth: SearchDepth::Advanced,
            limits: ResultLimits::default(),
            api_key: None,
        }
    }
}

/// Weights for the market scoring heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Tariffs above this cap all score zero.
    pub tariff_cap: f64,
    pub tariff_weight: f64,
    /// Static per-country bonuses; unlisted countries get 0.
    pub bonuses: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let mut bonuses = BTreeMap::new();
        bonuses.insert("Germany".to_string(), 5.0);
        bonuses.insert("Canada".to_string(), 3.0);

        Self {
            tariff_cap: 10.0,
            tariff_weight: 2.0,
            bonuses,
        }
    }
}

impl ScoringConfig {
    pub fn bonus_for(&self, country: &str) -> f64 {
        self.bonuses.get(country).copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        for (name, value) in [("tariff_cap", self.tariff_cap), ("tariff_weight", self.tariff_weight)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AdvisorError::ConfigError(format!(
                    "scoring.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if let Some((country, bonus)) = self.bonuses.iter().find(|(_, bonus)| !bonus.is_finite()) {
            return Err(AdvisorError::ConfigError(format!(
                "scoring bonus for '{}' must be finite, got {}",
                country, bonus
            )));
        }

        Ok(())
    }
}

/// Immutable settings for one advisor instance, handed to every component at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub scoring: ScoringConfig,
    pub reference: ReferenceTables,
    pub timeout_seconds: u64,
    pub max_concurrent_countries: usize,
    pub default_tariff_rate: f64,
    pub default_category_code: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
            scoring: ScoringConfig::default(),
            reference: ReferenceTables::default(),
            timeout_seconds: 30,
            max_concurrent_countries: 4,
            default_tariff_rate: 5.0,
            default_category_code: CategoryCode::FALLBACK.to_string(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, AdvisorError> {
        let config: AdvisorConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults, overlaid by the TOML file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, AdvisorError> {
        match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    AdvisorError::ConfigError(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.llm.model_name = model_name.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_concurrency(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent_countries = max_concurrent;
        self
    }

    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search.depth = depth;
        self
    }

    pub fn with_search_url(mut self, base_url: impl Into<String>) -> Self {
        self.search.base_url = base_url.into();
        self
    }

    pub fn with_search_api_key(mut self, api_key: Option<String>) -> Self {
        self.search.api_key = api_key;
        self
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.llm.model_name.trim().is_empty() {
            return Err(AdvisorError::ConfigError("model name cannot be empty".to_string()));
        }

        if !(5..=300).contains(&self.timeout_seconds) {
            return Err(AdvisorError::ConfigError(
                "timeout must be between 5 and 300 seconds".to_string(),
            ));
        }

        if self.max_concurrent_countries == 0 {
            return Err(AdvisorError::ConfigError(
                "max_concurrent_countries must be at least 1".to_string(),
            ));
        }

        for (name, limit) in self.search.limits.all() {
            if !(1..=10).contains(&limit) {
                return Err(AdvisorError::ConfigError(format!(
                    "search limit '{}' must be between 1 and 10, got {}",
                    name, limit
                )));
            }
        }

        if !self.default_tariff_rate.is_finite() || self.default_tariff_rate < 0.0 {
            return Err(AdvisorError::ConfigError(
                "default_tariff_rate must be a non-negative number".to_string(),
            ));
        }

        self.scoring.validate()?;

        if CategoryCode::parse(&self.default_category_code).is_none() {
            return Err(AdvisorError::ConfigError(format!(
                "default_category_code '{}' is not 6 digits",
                self.default_category_code
            )));
        }

        if let Some(bad) = self
            .reference
            .hs_codes
            .iter()
            .find(|m| CategoryCode::parse(&m.code).is_none())
        {
            return Err(AdvisorError::ConfigError(format!(
                "HS mapping '{}' has invalid code '{}'",
                bad.keyword, bad.code
            )));
        }

        Ok(())
    }

    pub fn default_category(&self) -> CategoryCode {
        CategoryCode::parse(&self.default_category_code).unwrap_or_else(CategoryCode::fallback)
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model_name: self.llm.model_name.clone(),
            api_key: self.llm.api_key.clone(),
            timeout_seconds: self.timeout_seconds,
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
        }
    }
}
