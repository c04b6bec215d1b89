use market_entry::analyzer::create_llm_client;
use market_entry::analyzer::summarizer::{parse_tariff_rate, try_parse_tariff_rate};
use market_entry::config::AdvisorConfig;
use market_entry::error::AdvisorError;
use market_entry::models::ProductQuery;

#[test]
fn empty_product_name_is_input_invalid() {
    for name in ["", "   ", "\t\n"] {
        let err = ProductQuery::new(name, "description").unwrap_err();
        assert!(matches!(err, AdvisorError::InputInvalid(_)));
        assert_eq!(err.exit_code(), 2);
    }
}

#[test]
fn product_text_is_trimmed() {
    let product = ProductQuery::new("  Bamboo Toothbrush ", " eco ").unwrap();
    assert_eq!(product.name(), "Bamboo Toothbrush");
    assert_eq!(product.description(), "eco");
}

#[test]
fn malformed_tariff_text_falls_back_to_default() {
    assert_eq!(parse_tariff_rate("7.5%", 5.0), 7.5);
    assert_eq!(parse_tariff_rate("N/A", 5.0), 5.0);
    assert!(matches!(
        try_parse_tariff_rate("roughly 3 percent"),
        Err(AdvisorError::MalformedNumericResponse(_))
    ));
}

#[test]
fn unsupported_model_is_a_client_error() {
    let mut config = AdvisorConfig::default().with_model("llama-3-70b").llm_config();
    config.api_key = Some("test".to_string());

    let err = match create_llm_client(config) {
        Ok(_) => panic!("unexpected success for unsupported model"),
        Err(err) => err,
    };
    assert!(matches!(err, AdvisorError::LlmClientError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn configuration_errors_map_to_exit_code_4() {
    let err = AdvisorConfig::from_toml_str("timeout_seconds = 1").unwrap_err();
    assert!(matches!(err, AdvisorError::ConfigError(_)));
    assert_eq!(err.exit_code(), 4);

    let err = AdvisorConfig::from_toml_str("timeout_seconds = [").unwrap_err();
    assert!(matches!(err, AdvisorError::ConfigParseError(_)));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn exit_codes() {
    assert_eq!(AdvisorError::InputInvalid("x".to_string()).exit_code(), 2);
    assert_eq!(AdvisorError::InvalidArguments("x".to_string()).exit_code(), 2);
    assert_eq!(
        AdvisorError::Timeout {
            operation: "report".to_string(),
            seconds: 30
        }
        .exit_code(),
        1
    );
}

#[test]
fn retrieval_failure_names_the_topic() {
    let err = AdvisorError::retrieval("competitors", "HTTP 502");
    assert_eq!(err.to_string(), "Retrieval failed for competitors: HTTP 502");
}
