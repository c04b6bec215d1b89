use crate::analyzer::prompts::PromptTemplate;
use crate::analyzer::retriever::EvidenceRetriever;
use crate::analyzer::summarizer::{try_parse_tariff_rate, Summarizer};
use crate::models::{CategoryCode, CountryMarketProfile, ProductQuery, SearchTopic, TariffSource};
use std::sync::Arc;
use tracing::{info, warn};

pub fn market_size_fallback(country: &str) -> String {
    format!("Growing market for sustainable products in {}", country)
}

pub fn competitors_fallback(country: &str) -> String {
    format!("Competitive market with established sustainable brands in {}", country)
}

/// Assembles one country's profile from live evidence and the static tables.
pub struct ProfileBuilder {
    retriever: Arc<EvidenceRetriever>,
    summarizer: Arc<Summarizer>,
    default_tariff_rate: f64,
}

impl ProfileBuilder {
    pub fn new(retriever: Arc<EvidenceRetriever>, summarizer: Arc<Summarizer>, default_tariff_rate: f64) -> Self {
        Self {
            retriever,
            summarizer,
            default_tariff_rate,
        }
    }

    /// Never fails: each live field falls back on its own.
    pub async fn build_profile(
        &self,
        category: &CategoryCode,
        product: &ProductQuery,
        country: &str,
    ) -> CountryMarketProfile {
        let (tariff, market_size, competitors) = futures::join!(
            self.tariff_rate(category, product, country),
            self.market_size(category, product, country),
            self.competitors(category, product, country),
        );
        let (tariff_rate, tariff_source) = tariff;

        info!(
            country,
            tariff_rate,
            tariff_source = ?tariff_source,
            "profile built"
        );

        CountryMarketProfile {
            country: country.to_string(),
            tariff_rate,
            tariff_source,
            market_size,
            competitors,
            entry_channels: self.retriever.entry_channels(country),
            regulations: self.retriever.regulations(country),
            incentives: self.retriever.incentives(country),
        }
    }

    async fn tariff_rate(
        &self,
        category: &CategoryCode,
        product: &ProductQuery,
        country: &str,
    ) -> (f64, TariffSource) {
        let evidence = self
            .retriever
            .search(SearchTopic::Tariff, product, category, country)
            .await;
        let instruction = PromptTemplate::tariff_instruction(category, country);

        let Some(answer) = self.summarizer.summarize(&evidence, &instruction).await else {
            return (self.default_tariff_rate, TariffSource::Default);
        };

        match try_parse_tariff_rate(&answer) {
            Ok(rate) => (rate, TariffSource::Evidence),
            Err(e) => {
                warn!(country, "using default tariff rate: {}", e);
                (self.default_tariff_rate, TariffSource::Default)
            }
        }
    }

    async fn market_size(&self, category: &CategoryCode, product: &ProductQuery, country: &str) -> String {
        let evidence = self
            .retriever
            .search(SearchTopic::MarketSize, product, category, country)
            .await;
        let instruction = PromptTemplate::market_size_instruction(product, country);

        self.summarizer
            .summarize(&evidence, &instruction)
            .await
            .unwrap_or_else(|| market_size_fallback(country))
    }

    async fn competitors(&self, category: &CategoryCode, product: &ProductQuery, country: &str) -> String {
        let evidence = self
            .retriever
            .search(SearchTopic::Competitors, product, category, country)
            .await;
        let instruction = PromptTemplate::competitors_instruction(product, country);

        self.summarizer
            .summarize(&evidence, &instruction)
            .await
            .unwrap_or_else(|| competitors_fallback(country))
    }
}
