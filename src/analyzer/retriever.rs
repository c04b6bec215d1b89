use crate::analyzer::bounded;
use crate::analyzer::search_client::SearchProvider;
use crate::config::{ReferenceTables, ResultLimits};
use crate::error::AdvisorError;
use crate::models::{CategoryCode, EvidenceRecord, EvidenceSet, ProductQuery, SearchDepth, SearchTopic};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Issues topic-scoped searches and answers static lookups from the reference tables.
pub struct EvidenceRetriever {
    search: Arc<dyn SearchProvider>,
    reference: Arc<ReferenceTables>,
    limits: ResultLimits,
    depth: SearchDepth,
    timeout: Duration,
}

impl EvidenceRetriever {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        reference: Arc<ReferenceTables>,
        limits: ResultLimits,
        depth: SearchDepth,
        timeout: Duration,
    ) -> Self {
        Self {
            search,
            reference,
            limits,
            depth,
            timeout,
        }
    }

    /// Evidence for one topic and country. Failures are logged and yield an empty set.
    pub async fn search(
        &self,
        topic: SearchTopic,
        product: &ProductQuery,
        category: &CategoryCode,
        country: &str,
    ) -> EvidenceSet {
        let query = build_query(topic, product, category, country);
        let max_results = self.limits.for_topic(topic);
        match self.fetch(topic.as_str(), country, &query, max_results).await {
            Ok(records) => EvidenceSet::new(topic, country, records),
            Err(e) => {
                warn!(country, "{}", e);
                EvidenceSet::empty(topic, country)
            }
        }
    }

    /// Executes an already-built query under `label`, e.g. a partner or role-specific search.
    pub async fn search_query(&self, label: &str, country: &str, query: &str, max_results: usize) -> EvidenceSet {
        match self.fetch(label, country, query, max_results).await {
            Ok(records) => EvidenceSet::labeled(label, country, records),
            Err(e) => {
                warn!(country, "{}", e);
                EvidenceSet::labeled(label, country, Vec::new())
            }
        }
    }

    async fn fetch(
        &self,
        label: &str,
        country: &str,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<EvidenceRecord>, AdvisorError> {
        debug!(label, country, max_results, "search query: {}", query);

        let records = bounded(label, self.timeout, self.search.search(query, max_results, self.depth))
            .await
            .map_err(|e| AdvisorError::retrieval(label, e))?;

        debug!(label, country, results = records.len(), "evidence retrieved");
        Ok(records)
    }

    pub fn entry_channels(&self, country: &str) -> Vec<String> {
        self.reference.entry_channels_for(country)
    }

    pub fn regulations(&self, country: &str) -> Vec<String> {
        self.reference.regulations_for(country)
    }

    pub fn incentives(&self, country: &str) -> BTreeMap<String, String> {
        self.reference.incentives_for(country)
    }
}

pub fn build_query(topic: SearchTopic, product: &ProductQuery, category: &CategoryCode, country: &str) -> String {
    match topic {
        SearchTopic::Tariff => format!("tariff rate HS code {} {} 2024 import duty", category, country),
        SearchTopic::MarketSize => format!(
            "market size {} sustainable eco-friendly {} 2024",
            product.name(),
            country
        ),
        SearchTopic::Competitors => format!(
            "competitors {} sustainable {} Amazon marketplace",
            product.name(),
            country
        ),
        SearchTopic::Partners => partners_query(category.as_str(), country),
    }
}

pub fn partners_query(product_category: &str, country: &str) -> String {
    format!("distributors importers {} sustainable {}", product_category, country)
}
