use market_entry::analyzer::MarketScorer;
use market_entry::config::{AdvisorConfig, ScoringConfig};
use market_entry::models::{CountryMarketProfile, ProfileSet, TariffSource};
use std::collections::BTreeMap;

fn profile(country: &str, tariff_rate: f64) -> CountryMarketProfile {
    CountryMarketProfile {
        country: country.to_string(),
        tariff_rate,
        tariff_source: TariffSource::Evidence,
        market_size: format!("Growing market for sustainable products in {}", country),
        competitors: String::new(),
        entry_channels: Vec::new(),
        regulations: Vec::new(),
        incentives: BTreeMap::new(),
    }
}

fn set(profiles: Vec<CountryMarketProfile>) -> ProfileSet {
    profiles.into_iter().collect()
}

#[test]
fn germany_at_zero_beats_canada_at_ten() {
    let scorer = MarketScorer::new(AdvisorConfig::default().scoring);
    let profiles = set(vec![profile("Canada", 10.0), profile("Germany", 0.0)]);

    let scores = scorer.score_all(&profiles);
    assert_eq!(scores, vec![("Canada".to_string(), 3.0), ("Germany".to_string(), 25.0)]);
    assert_eq!(scorer.score_and_select(&profiles).as_deref(), Some("Germany"));
}

#[test]
fn selection_is_deterministic() {
    let scorer = MarketScorer::default();
    let profiles = set(vec![profile("UAE", 2.0), profile("India", 2.0), profile("Canada", 4.0)]);

    let first = scorer.score_and_select(&profiles);
    for _ in 0..10 {
        assert_eq!(scorer.score_and_select(&profiles), first);
    }
    // UAE 16, India 16, Canada 15
    assert_eq!(first.as_deref(), Some("UAE"));
}

#[test]
fn tariffs_above_cap_score_only_the_bonus() {
    let scorer = MarketScorer::default();
    assert_eq!(scorer.score(&profile("Germany", 35.0)), 5.0);
    assert_eq!(scorer.score(&profile("Norway", 12.5)), 0.0);
}

#[test]
fn bonuses_come_from_configuration() {
    let mut config = ScoringConfig::default();
    config.bonuses.clear();
    config.bonuses.insert("India".to_string(), 10.0);
    let scorer = MarketScorer::new(config);

    let profiles = set(vec![profile("Germany", 0.0), profile("India", 0.0)]);
    assert_eq!(scorer.score_and_select(&profiles).as_deref(), Some("India"));
}

#[test]
fn empty_profile_set_has_no_best_market() {
    assert!(MarketScorer::default().score_and_select(&ProfileSet::new()).is_none());
    assert!(MarketScorer::default().score_all(&ProfileSet::new()).is_empty());
}
