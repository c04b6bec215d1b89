use clap::Parser;
use market_entry::analyzer::mock::{MockLlm, MockSearch};
use market_entry::analyzer::AnalysisOrchestrator;
use market_entry::cli::{Cli, CliHandler};
use market_entry::config::AdvisorConfig;
use market_entry::error::AdvisorError;
use std::sync::Arc;

fn offline_orchestrator() -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(
        AdvisorConfig::default(),
        Arc::new(MockLlm::failing()),
        Arc::new(MockSearch::failing()),
    )
}

fn handler(args: &[&str]) -> CliHandler {
    let mut argv = vec!["market-entry"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    cli.validate().unwrap();
    CliHandler::new(cli)
}

#[test]
fn test_cli_requires_product() {
    let result = Cli::try_parse_from(["market-entry", "--country", "Germany"]);
    assert!(result.is_err());
}

#[test]
fn test_blank_product_maps_to_exit_code_2() {
    let cli = Cli::try_parse_from(["market-entry", "--product", "  "]).unwrap();
    let err = cli.validate().unwrap_err();

    assert!(matches!(err, AdvisorError::InputInvalid(_)));
    assert!(err.to_string().contains("Please enter a product name"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_invalid_format_is_rejected() {
    let result = Cli::try_parse_from(["market-entry", "-p", "Soap", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_missing_config_file_maps_to_exit_code_4() {
    let cli = Cli::try_parse_from([
        "market-entry",
        "-p",
        "Soap",
        "--config",
        "/nonexistent/market-entry.toml",
    ])
    .unwrap();

    let err = cli.load_config().unwrap_err();
    assert!(matches!(err, AdvisorError::ConfigError(_)));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_json_output_shape() {
    let handler = handler(&["-p", "Bamboo Toothbrush", "-c", "Germany,Canada", "--format", "json"]);
    let output = handler.render(&offline_orchestrator()).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["product"]["name"], "Bamboo Toothbrush");
    assert_eq!(value["category"], "960321");
    assert!(value["profiles"].is_object());
    assert_eq!(value["profiles"]["Germany"]["tariff_rate"], 5.0);
    assert_eq!(value["profiles"]["Canada"]["tariff_source"], "default");
    assert_eq!(value["best_market"], "Germany");
    assert!(value["generated_at"].is_string());
    assert_eq!(value["scores"][0]["country"], "Germany");
    assert_eq!(value["scores"][0]["score"], 15.0);
    assert!(value.get("report").is_none());
}

#[tokio::test]
async fn test_default_countries_in_text_output() {
    std::env::set_var("NO_COLOR", "1");
    let handler = handler(&["-p", "Bamboo Toothbrush"]);
    let output = handler.render(&offline_orchestrator()).await.unwrap();

    assert!(output.contains("=== MARKET ENTRY ANALYSIS: Bamboo Toothbrush ==="));
    let germany = output.find("Germany\n").unwrap();
    let uae = output.find("UAE\n").unwrap();
    let canada = output.find("Canada\n").unwrap();
    assert!(germany < uae && uae < canada);
    assert!(output.contains("Recommended market: Germany"));
}

#[tokio::test]
async fn test_extras_fall_back_when_services_fail() {
    let handler = handler(&[
        "-p",
        "Bamboo Toothbrush",
        "-c",
        "Canada",
        "--format",
        "json",
        "--report",
        "--translate",
        "French",
        "--partners",
        "Canada",
    ]);
    let output = handler.render(&offline_orchestrator()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    let report = value["report"].as_str().unwrap();
    assert!(report.starts_with("MARKET ENTRY REPORT: Bamboo Toothbrush"));
    assert!(value["translation"]
        .as_str()
        .unwrap()
        .contains("Translation to French unavailable"));
    assert_eq!(value["partners"], "Partner research needed for Canada market");
}

#[tokio::test]
async fn test_perspective_mode() {
    let handler = handler(&[
        "-p",
        "Bamboo Toothbrush",
        "-c",
        "Germany,UAE",
        "--perspective",
        "strategy-recommendation",
        "--format",
        "json",
    ]);
    let output = handler.render(&offline_orchestrator()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["perspective"], "strategy-recommendation");
    assert_eq!(
        value["output"],
        "**Germany**: No data found.\n\n**UAE**: No data found."
    );
}
