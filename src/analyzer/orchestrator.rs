use crate::analyzer::classifier::ProductClassifier;
use crate::analyzer::llm_client::{create_llm_client, LlmProvider, UnavailableLlm};
use crate::analyzer::perspective::PerspectiveRole;
use crate::analyzer::profile_builder::ProfileBuilder;
use crate::analyzer::retriever::{partners_query, EvidenceRetriever};
use crate::analyzer::scorer::MarketScorer;
use crate::analyzer::search_client::{SearchProvider, TavilySearchClient};
use crate::analyzer::summarizer::Summarizer;
use crate::analyzer::synthesizer::RecommendationSynthesizer;
use crate::config::{AdvisorConfig, ReferenceTables, ResultLimits};
use crate::error::AdvisorError;
use crate::models::{AnalysisResult, CategoryCode, CountryMarketProfile, ProductQuery, ProfileSet, SearchTopic};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{info, warn};

pub const NO_DATA: &str = "No data found.";

/// Runs the full pipeline: classify once, profile every country, score, synthesize.
pub struct AnalysisOrchestrator {
    llm_client: Arc<dyn LlmProvider>,
    reference: Arc<ReferenceTables>,
    limits: ResultLimits,
    classifier: ProductClassifier,
    retriever: Arc<EvidenceRetriever>,
    summarizer: Arc<Summarizer>,
    profile_builder: ProfileBuilder,
    scorer: MarketScorer,
    synthesizer: RecommendationSynthesizer,
    max_concurrent_countries: usize,
    default_timeout: Duration,
}

impl AnalysisOrchestrator {
    pub fn new(config: AdvisorConfig, llm: Arc<dyn LlmProvider>, search: Arc<dyn SearchProvider>) -> Self {
        let default_timeout = Duration::from_secs(config.timeout_seconds);
        let reference = Arc::new(config.reference.clone());

        let classifier = ProductClassifier::new(
            llm.clone(),
            reference.clone(),
            config.default_category(),
            default_timeout,
        );
        let retriever = Arc::new(EvidenceRetriever::new(
            search,
            reference.clone(),
            config.search.limits.clone(),
            config.search.depth,
            default_timeout,
        ));
        let summarizer = Arc::new(Summarizer::new(llm.clone(), default_timeout));
        let profile_builder = ProfileBuilder::new(retriever.clone(), summarizer.clone(), config.default_tariff_rate);

        Self {
            llm_client: llm.clone(),
            reference,
            limits: config.search.limits.clone(),
            classifier,
            retriever,
            summarizer,
            profile_builder,
            scorer: MarketScorer::new(config.scoring.clone()),
            synthesizer: RecommendationSynthesizer::new(llm, default_timeout),
            max_concurrent_countries: config.max_concurrent_countries.max(1),
            default_timeout,
        }
    }

    /// Production wiring. A missing model key or search key degrades every
    /// affected call to its default instead of failing construction.
    pub fn from_config(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        config.validate()?;

        let llm: Arc<dyn LlmProvider> = match create_llm_client(config.llm_config()) {
            Ok(client) => Arc::from(client),
            Err(e) => {
                warn!("LLM unavailable, generated text will fall back to defaults: {}", e);
                Arc::new(UnavailableLlm::new(config.llm.model_name.clone(), e.to_string()))
            }
        };

        let search_key = config
            .search
            .api_key
            .clone()
            .or_else(|| std::env::var("TAVILY_API_KEY").ok());
        let search = TavilySearchClient::new(&config.search.base_url, search_key, config.timeout_seconds)?;
        if !search.has_api_key() {
            warn!("search API key not configured, live evidence will be unavailable");
        }

        Ok(Self::new(config, llm, Arc::new(search)))
    }

    /// Validates the product text, then runs [`analyze_query`](Self::analyze_query).
    pub async fn analyze<S: AsRef<str>>(
        &self,
        name: &str,
        description: &str,
        countries: &[S],
    ) -> Result<AnalysisResult, AdvisorError> {
        let product = ProductQuery::new(name, description)?;
        self.analyze_query(&product, countries).await
    }

    pub async fn analyze_query<S: AsRef<str>>(
        &self,
        product: &ProductQuery,
        countries: &[S],
    ) -> Result<AnalysisResult, AdvisorError> {
        let countries = self.normalize_countries(countries);
        if countries.is_empty() {
            return Err(AdvisorError::InputInvalid(
                "Please select at least one target country.".to_string(),
            ));
        }

        info!(product = product.name(), countries = ?countries, "starting market analysis");

        let category = self.classifier.classify(product).await;
        let profiles = self.build_profiles(&category, product, &countries).await;

        let best_market = self
            .scorer
            .score_and_select(&profiles)
            .ok_or_else(|| AdvisorError::InputInvalid("no market profiles were produced".to_string()))?;
        info!(best_market = %best_market, "best market selected");

        let recommendation = self.synthesizer.synthesize(&profiles, &best_market, product).await;

        Ok(AnalysisResult::new(
            product.clone(),
            category,
            profiles,
            best_market,
            recommendation,
        ))
    }

    async fn build_profiles(&self, category: &CategoryCode, product: &ProductQuery, countries: &[String]) -> ProfileSet {
        let mut profiles = ProfileSet::new();

        // Batches keep at most `max_concurrent_countries` countries in flight
        for chunk in countries.chunks(self.max_concurrent_countries) {
            let batch_futures: Vec<_> = chunk
                .iter()
                .map(|country| self.profile_builder.build_profile(category, product, country))
                .collect();

            let batch_results: Vec<CountryMarketProfile> = join_all(batch_futures).await;
            for profile in batch_results {
                profiles.insert(profile);
            }
        }

        profiles
    }

    /// Trims, drops blanks, canonicalizes supported names and removes
    /// duplicates. An empty list means the configured default countries.
    pub fn normalize_countries<S: AsRef<str>>(&self, countries: &[S]) -> Vec<String> {
        let mut normalized: Vec<String> = Vec::new();

        for raw in countries {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }

            let country = match self.reference.canonical_country(trimmed) {
                Some(canonical) => canonical.to_string(),
                None => {
                    warn!(country = trimmed, "country is not in the supported list; using generic data");
                    trimmed.to_string()
                }
            };

            if !normalized.iter().any(|c| c.eq_ignore_ascii_case(&country)) {
                normalized.push(country);
            }
        }

        if normalized.is_empty() {
            normalized = self.reference.default_countries.clone();
        }
        normalized
    }

    pub fn scores(&self, analysis: &AnalysisResult) -> Vec<(String, f64)> {
        self.scorer.score_all(&analysis.profiles)
    }

    pub async fn synthesize_report(&self, analysis: &AnalysisResult) -> String {
        let scores = self.scores(analysis);
        self.synthesizer.report(analysis, &scores).await
    }

    pub async fn translate_listing(&self, product: &ProductQuery, language: &str) -> String {
        self.synthesizer.translate(product, language.trim()).await
    }

    pub async fn partner_list(&self, country: &str, product_category: &str) -> String {
        let country = self
            .reference
            .canonical_country(country)
            .unwrap_or(country.trim())
            .to_string();
        let query = partners_query(product_category, &country);
        let evidence = self
            .retriever
            .search_query(SearchTopic::Partners.as_str(), &country, &query, self.limits.partners)
            .await;

        self.synthesizer.partner_list(&evidence, product_category, &country).await
    }

    /// One section per country, `**{country}**: {summary}`, separated by blank lines.
    pub async fn perspective<S: AsRef<str>>(
        &self,
        role: PerspectiveRole,
        product: &ProductQuery,
        countries: &[S],
    ) -> String {
        let countries = self.normalize_countries(countries);
        info!(role = %role, countries = ?countries, "running perspective analysis");

        let mut sections = Vec::with_capacity(countries.len());
        for chunk in countries.chunks(self.max_concurrent_countries) {
            let batch_futures: Vec<_> = chunk
                .iter()
                .map(|country| self.perspective_section(role, product, country))
                .collect();
            sections.extend(join_all(batch_futures).await);
        }

        sections.join("\n\n")
    }

    async fn perspective_section(&self, role: PerspectiveRole, product: &ProductQuery, country: &str) -> String {
        let query = role.query(product, country);
        let evidence = self
            .retriever
            .search_query(role.as_str(), country, &query, self.limits.perspective)
            .await;

        let summary = match self
            .summarizer
            .summarize(&evidence, &role.instruction(product, country))
            .await
        {
            Some(summary) => summary,
            None => evidence.first_content().unwrap_or(NO_DATA).to_string(),
        };

        format!("**{}**: {}", country, summary)
    }

    pub fn get_model_info(&self) -> String {
        format!(
            "Model: {}, Timeout: {}s, Max Concurrent: {}",
            self.llm_client.get_model_name(),
            self.default_timeout.as_secs(),
            self.max_concurrent_countries
        )
    }
}
