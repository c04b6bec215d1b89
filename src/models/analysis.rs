use crate::models::{CategoryCode, CountryMarketProfile, ProductQuery, ProfileSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one full analysis run. Built once at the end of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub product: ProductQuery,
    pub category: CategoryCode,
    pub profiles: ProfileSet,
    pub best_market: String,
    pub recommendation: String,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn new(
        product: ProductQuery,
        category: CategoryCode,
        profiles: ProfileSet,
        best_market: String,
        recommendation: String,
    ) -> Self {
        Self {
            product,
            category,
            profiles,
            best_market,
            recommendation,
            generated_at: Utc::now(),
        }
    }

    pub fn best_profile(&self) -> Option<&CountryMarketProfile> {
        self.profiles.get(&self.best_market)
    }

    pub fn countries(&self) -> Vec<&str> {
        self.profiles.countries().collect()
    }

    /// Number of profiles whose tariff fell back to the default rate.
    pub fn defaulted_tariffs(&self) -> usize {
        self.profiles.iter().filter(|p| p.tariff_is_default()).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
