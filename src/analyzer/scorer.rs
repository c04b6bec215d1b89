use crate::config::ScoringConfig;
use crate::models::{CountryMarketProfile, ProfileSet};

/// Ranks profiles with a fixed heuristic: lower tariffs score higher, plus a
/// configured per-country bonus.
#[derive(Debug, Clone, Default)]
pub struct MarketScorer {
    config: ScoringConfig,
}

impl MarketScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, profile: &CountryMarketProfile) -> f64 {
        let tariff = profile.tariff_rate.max(0.0).min(self.config.tariff_cap);
        (self.config.tariff_cap - tariff) * self.config.tariff_weight + self.config.bonus_for(&profile.country)
    }

    /// Scores in input order.
    pub fn score_all(&self, profiles: &ProfileSet) -> Vec<(String, f64)> {
        profiles
            .iter()
            .map(|p| (p.country.clone(), self.score(p)))
            .collect()
    }

    /// Highest-scoring country; ties keep the earliest one.
    pub fn score_and_select(&self, profiles: &ProfileSet) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for profile in profiles.iter() {
            let score = self.score(profile);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((profile.country.as_str(), score)),
            }
        }
        best.map(|(country, _)| country.to_string())
    }
}
