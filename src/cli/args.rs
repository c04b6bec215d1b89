use crate::analyzer::PerspectiveRole;
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::models::{ProductQuery, SearchDepth};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "market-entry")]
#[command(about = "Market entry advisor - classify a product, profile target countries and recommend where to launch")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Product name
    #[arg(short = 'p', long)]
    pub product: String,

    /// Product description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Target country; repeat or comma-separate. Defaults to Germany, UAE, Canada
    #[arg(short = 'c', long = "country", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also generate the comprehensive market entry report
    #[arg(long)]
    pub report: bool,

    /// Translate the product listing into this language
    #[arg(long, value_name = "LANGUAGE")]
    pub translate: Option<String>,

    /// Produce a partner list for this country
    #[arg(long, value_name = "COUNTRY")]
    pub partners: Option<String>,

    /// Run a single analyst perspective instead of the full pipeline
    #[arg(long, value_name = "ROLE", value_parser = parse_perspective)]
    pub perspective: Option<PerspectiveRole>,

    /// TOML configuration file
    #[arg(long, env = "MARKET_ENTRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// LLM model to use
    #[arg(short = 'm', long, env = "MARKET_ENTRY_MODEL")]
    pub model: Option<String>,

    /// Timeout for each model or search call in seconds (5-300)
    #[arg(short = 't', long, value_parser = validate_timeout)]
    pub timeout: Option<u64>,

    /// Search depth (basic, advanced)
    #[arg(long, value_parser = parse_search_depth)]
    pub search_depth: Option<SearchDepth>,

    /// Countries analyzed concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Search API base URL
    #[arg(long, env = "TAVILY_BASE_URL")]
    pub search_url: Option<String>,

    /// Search API key
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    pub search_api_key: Option<String>,

    /// Enable verbose output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Enable debug output including prompts and queries
    #[arg(short = 'd', long)]
    pub debug: bool,
}

impl Cli {
    pub fn parse_args() -> Result<Self, AdvisorError> {
        let cli = Self::try_parse().map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => AdvisorError::InvalidArguments(e.to_string()),
        })?;
        cli.validate()?;
        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        self.product_query()?;

        if let Some(timeout) = self.timeout {
            if !(5..=300).contains(&timeout) {
                return Err(AdvisorError::InvalidArguments(
                    "Timeout must be between 5 and 300 seconds".to_string(),
                ));
            }
        }

        if self.concurrency == Some(0) {
            return Err(AdvisorError::InvalidArguments(
                "Concurrency must be at least 1".to_string(),
            ));
        }

        if let Some(language) = &self.translate {
            if language.trim().is_empty() {
                return Err(AdvisorError::InvalidArguments(
                    "Translation language cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn product_query(&self) -> Result<ProductQuery, AdvisorError> {
        ProductQuery::new(&self.product, &self.description)
    }

    /// File configuration with command line overrides applied on top.
    pub fn load_config(&self) -> Result<AdvisorConfig, AdvisorError> {
        let config = AdvisorConfig::load(self.config.as_deref())?;
        let config = self.apply_overrides(config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, mut config: AdvisorConfig) -> AdvisorConfig {
        if let Some(model) = &self.model {
            config = config.with_model(model.trim());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(depth) = self.search_depth {
            config = config.with_search_depth(depth);
        }
        if let Some(concurrency) = self.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(url) = &self.search_url {
            config = config.with_search_url(url.trim());
        }
        if self.search_api_key.is_some() {
            config = config.with_search_api_key(self.search_api_key.clone());
        }
        config
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn should_use_color(&self) -> bool {
        // Disable color if NO_COLOR environment variable is set
        self.format == OutputFormat::Text && std::env::var("NO_COLOR").is_err()
    }
}

fn validate_timeout(s: &str) -> Result<u64, String> {
    let timeout: u64 = s.parse().map_err(|_| "Timeout must be a number")?;

    if (5..=300).contains(&timeout) {
        Ok(timeout)
    } else {
        Err("Timeout must be between 5 and 300 seconds".to_string())
    }
}

fn parse_search_depth(s: &str) -> Result<SearchDepth, String> {
    SearchDepth::from_str(s).ok_or_else(|| format!("unknown search depth '{}', expected basic or advanced", s))
}

fn parse_perspective(s: &str) -> Result<PerspectiveRole, String> {
    PerspectiveRole::from_str(s).ok_or_else(|| {
        let known: Vec<&str> = PerspectiveRole::ALL.iter().map(|r| r.as_str()).collect();
        format!("unknown perspective '{}', expected one of: {}", s, known.join(", "))
    })
}
