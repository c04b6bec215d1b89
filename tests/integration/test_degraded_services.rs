use market_entry::analyzer::mock::{MockLlm, MockSearch};
use market_entry::analyzer::{AnalysisOrchestrator, PerspectiveRole};
use market_entry::config::AdvisorConfig;
use market_entry::models::ProductQuery;
use std::sync::Arc;
use std::time::Duration;

fn working_llm() -> MockLlm {
    MockLlm::new()
        .respond_when("approximate tariff rate", "4.5")
        .respond_when("market size information", "USD 25M premium segment")
        .respond_when("main competitors", "Local eco brands")
        .otherwise("Narrative text")
}

#[tokio::test]
async fn test_competitor_failure_for_uae_is_isolated() {
    let search = MockSearch::new()
        .fail_when("competitors Bamboo Toothbrush sustainable UAE")
        .otherwise(&["relevant evidence"]);
    let orchestrator = AnalysisOrchestrator::new(AdvisorConfig::default(), Arc::new(working_llm()), Arc::new(search));

    let result = orchestrator
        .analyze("Bamboo Toothbrush", "", &["UAE", "Germany"])
        .await
        .unwrap();

    let uae = result.profiles.get("UAE").unwrap();
    assert_eq!(uae.competitors, "Competitive market with established sustainable brands in UAE");
    assert_eq!(uae.tariff_rate, 4.5);
    assert!(!uae.tariff_is_default());
    assert_eq!(uae.market_size, "USD 25M premium segment");

    let germany = result.profiles.get("Germany").unwrap();
    assert_eq!(germany.competitors, "Local eco brands");
}

#[tokio::test]
async fn test_malformed_classification_falls_back_to_keyword_table() {
    let llm = MockLlm::new()
        .respond_when("most appropriate HS code", "HS 3401.11 - soap")
        .otherwise("Narrative text");
    let orchestrator = AnalysisOrchestrator::new(
        AdvisorConfig::default(),
        Arc::new(llm),
        Arc::new(MockSearch::failing()),
    );

    let result = orchestrator
        .analyze("Natural Soap Bar", "", &["Canada"])
        .await
        .unwrap();

    assert_eq!(result.category.as_str(), "340111");
    assert_ne!(result.category.as_str(), "HS 3401.11 - soap");
}

#[tokio::test(start_paused = true)]
async fn test_slow_services_time_out_to_defaults() {
    let llm = MockLlm::new()
        .otherwise("too late")
        .with_delay(Duration::from_secs(120));
    let config = AdvisorConfig::default().with_timeout(5);
    let orchestrator = AnalysisOrchestrator::new(
        config,
        Arc::new(llm),
        Arc::new(MockSearch::new().otherwise(&["evidence"])),
    );

    let result = orchestrator
        .analyze("Ceramic Mug", "", &["Germany", "Norway"])
        .await
        .unwrap();

    assert_eq!(result.category.as_str(), "960321");
    assert_eq!(result.defaulted_tariffs(), 2);
    assert_eq!(
        result.profiles.get("Norway").unwrap().market_size,
        "Growing market for sustainable products in Norway"
    );
    assert_eq!(
        result.profiles.get("Norway").unwrap().entry_channels,
        vec!["E-commerce platforms", "Local distributors", "Direct partnerships"]
    );
    assert_eq!(result.best_market, "Germany");
    assert!(result.recommendation.contains("Germany"));
}

#[tokio::test]
async fn test_unknown_country_uses_generic_tables() {
    let orchestrator = AnalysisOrchestrator::new(
        AdvisorConfig::default(),
        Arc::new(MockLlm::failing()),
        Arc::new(MockSearch::failing()),
    );

    let result = orchestrator
        .analyze("Bamboo Toothbrush", "", &["Atlantis"])
        .await
        .unwrap();

    let atlantis = result.profiles.get("Atlantis").unwrap();
    assert_eq!(atlantis.regulations, vec!["Standard import regulations apply"]);
    assert!(atlantis.incentives.is_empty());
    assert_eq!(result.best_market, "Atlantis");
}

#[tokio::test]
async fn test_perspective_uses_first_result_when_model_fails() {
    let search = MockSearch::new()
        .results_when("for Bamboo Toothbrush in Canada", &["Partner with Canadian eco retailers", "second"])
        .otherwise(&[]);
    let orchestrator = AnalysisOrchestrator::new(
        AdvisorConfig::default(),
        Arc::new(MockLlm::failing()),
        Arc::new(search),
    );
    let product = ProductQuery::named("Bamboo Toothbrush").unwrap();

    let output = orchestrator
        .perspective(PerspectiveRole::StrategyRecommendation, &product, &["Canada", "UAE"])
        .await;

    assert_eq!(
        output,
        "**Canada**: Partner with Canadian eco retailers\n\n**UAE**: No data found."
    );
}
