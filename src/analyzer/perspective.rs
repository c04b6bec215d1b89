use crate::models::ProductQuery;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Analyst roles. Each one is a query template plus a summary instruction
/// over the shared retriever and summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerspectiveRole {
    MarketResearch,
    CompetitiveIntelligence,
    CulturalIntelligence,
    FinancialAnalysis,
    RegulatoryCompliance,
    StrategyRecommendation,
}

impl PerspectiveRole {
    pub const ALL: [PerspectiveRole; 6] = [
        PerspectiveRole::MarketResearch,
        PerspectiveRole::CompetitiveIntelligence,
        PerspectiveRole::CulturalIntelligence,
        PerspectiveRole::FinancialAnalysis,
        PerspectiveRole::RegulatoryCompliance,
        PerspectiveRole::StrategyRecommendation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PerspectiveRole::MarketResearch => "market-research",
            PerspectiveRole::CompetitiveIntelligence => "competitive-intelligence",
            PerspectiveRole::CulturalIntelligence => "cultural-intelligence",
            PerspectiveRole::FinancialAnalysis => "financial-analysis",
            PerspectiveRole::RegulatoryCompliance => "regulatory-compliance",
            PerspectiveRole::StrategyRecommendation => "strategy-recommendation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PerspectiveRole::MarketResearch => "Market Research Agent",
            PerspectiveRole::CompetitiveIntelligence => "Competitive Intelligence Agent",
            PerspectiveRole::CulturalIntelligence => "Cultural Intelligence Agent",
            PerspectiveRole::FinancialAnalysis => "Financial Analysis Agent",
            PerspectiveRole::RegulatoryCompliance => "Regulatory Compliance Agent",
            PerspectiveRole::StrategyRecommendation => "Strategy Recommendation Agent",
        }
    }

    /// Accepts the kebab-case name, with `_` or spaces in place of `-`.
    pub fn from_str(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL.iter().copied().find(|role| role.as_str() == normalized)
    }

    pub fn query(&self, product: &ProductQuery, country: &str) -> String {
        let name = product.name();
        match self {
            PerspectiveRole::MarketResearch => {
                format!("market size growth trends consumer demand for {} in {} 2024", name, country)
            }
            PerspectiveRole::CompetitiveIntelligence => {
                format!("top competitors brands pricing for {} in {} 2024", name, country)
            }
            PerspectiveRole::CulturalIntelligence => format!(
                "consumer preferences cultural attitudes sustainability {} in {}",
                name, country
            ),
            PerspectiveRole::FinancialAnalysis => format!(
                "import costs margins retail pricing logistics for {} in {} 2024",
                name, country
            ),
            PerspectiveRole::RegulatoryCompliance => format!(
                "import regulations certification labeling requirements for {} in {} 2024",
                name, country
            ),
            PerspectiveRole::StrategyRecommendation => format!(
                "best go-to-market strategies, entry channels, and partnership opportunities for {} in {} 2024",
                name, country
            ),
        }
    }

    pub fn instruction(&self, product: &ProductQuery, country: &str) -> String {
        let focus = match self {
            PerspectiveRole::MarketResearch => "market size, growth rate and demand drivers",
            PerspectiveRole::CompetitiveIntelligence => "the main competitors and their price positioning",
            PerspectiveRole::CulturalIntelligence => "consumer attitudes and cultural factors that affect adoption",
            PerspectiveRole::FinancialAnalysis => "landed cost, expected margins and pricing headroom",
            PerspectiveRole::RegulatoryCompliance => "import rules, certifications and labeling obligations",
            PerspectiveRole::StrategyRecommendation => "the most promising go-to-market approach and partners",
        };
        format!(
            "As a {}, summarize in 2-3 sentences {} for {} in {}.",
            self.title(),
            focus,
            product.name(),
            country
        )
    }
}

impl fmt::Display for PerspectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
