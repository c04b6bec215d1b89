use serde::{Deserialize, Serialize};
use std::fmt;

/// Live search topics. Entry channels, regulations and incentives come from
/// the static reference tables instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchTopic {
    Tariff,
    MarketSize,
    Competitors,
    Partners,
}

impl SearchTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchTopic::Tariff => "tariff",
            SearchTopic::MarketSize => "market_size",
            SearchTopic::Competitors => "competitors",
            SearchTopic::Partners => "partners",
        }
    }
}

impl fmt::Display for SearchTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

impl SearchDepth {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Basic => "basic",
            SearchDepth::Advanced => "advanced",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "basic" => Some(SearchDepth::Basic),
            "advanced" => Some(SearchDepth::Advanced),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    pub content: String,
    #[serde(default)]
    pub score: f64,
}

impl EvidenceRecord {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            content: content.into(),
            score: 0.0,
        }
    }

    pub fn with_source(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.title = title.into();
        self.url = url.into();
        self
    }
}

/// Raw search results for one (topic, country) pair.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EvidenceSet {
    pub topic: Option<SearchTopic>,
    /// Operation name used in logs and timeout errors.
    #[serde(skip)]
    pub label: String,
    pub country: String,
    pub records: Vec<EvidenceRecord>,
}

impl EvidenceSet {
    pub fn new(topic: SearchTopic, country: impl Into<String>, records: Vec<EvidenceRecord>) -> Self {
        Self {
            topic: Some(topic),
            label: topic.as_str().to_string(),
            country: country.into(),
            records,
        }
    }

    /// Results of an ad-hoc query that belongs to no live topic.
    pub fn labeled(label: impl Into<String>, country: impl Into<String>, records: Vec<EvidenceRecord>) -> Self {
        Self {
            topic: None,
            label: label.into(),
            country: country.into(),
            records,
        }
    }

    pub fn empty(topic: SearchTopic, country: impl Into<String>) -> Self {
        Self::new(topic, country, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.records.iter().all(|r| r.content.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn first_content(&self) -> Option<&str> {
        self.records
            .iter()
            .map(|r| r.content.trim())
            .find(|c| !c.is_empty())
    }
}
