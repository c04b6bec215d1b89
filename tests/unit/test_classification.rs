use market_entry::analyzer::classifier::parse_category_response;
use market_entry::analyzer::mock::MockLlm;
use market_entry::analyzer::{ClassificationSource, ProductClassifier};
use market_entry::config::{AdvisorConfig, HsMapping, ReferenceTables};
use market_entry::models::{CategoryCode, ProductQuery};
use std::sync::Arc;
use std::time::Duration;

fn classifier_with(llm: MockLlm, reference: ReferenceTables, default_code: CategoryCode) -> ProductClassifier {
    ProductClassifier::new(Arc::new(llm), Arc::new(reference), default_code, Duration::from_secs(5))
}

#[test]
fn category_code_requires_six_ascii_digits() {
    assert!(CategoryCode::parse("960321").is_some());
    assert!(CategoryCode::parse("96032").is_none());
    assert!(CategoryCode::parse("9603210").is_none());
    assert!(CategoryCode::parse("96O321").is_none());
    assert!(CategoryCode::parse("９６０３２１").is_none());
}

#[test]
fn response_parsing_never_returns_malformed_text() {
    for response in ["", "N/A", "9603.21", "HS code 960321", "960321 or 330610", "12345"] {
        assert!(
            parse_category_response(response).is_none(),
            "accepted malformed response {:?}",
            response
        );
    }
    assert_eq!(parse_category_response("'482390'").unwrap().as_str(), "482390");
}

#[tokio::test]
async fn first_matching_keyword_wins() {
    let classifier = classifier_with(MockLlm::failing(), ReferenceTables::default(), CategoryCode::fallback());
    let product = ProductQuery::named("Sustainable Clothing made from Organic Food waste").unwrap();

    let (code, source) = classifier.classify_with_source(&product).await;
    assert_eq!(code.as_str(), "620443");
    assert_eq!(source, ClassificationSource::KeywordTable);
}

#[tokio::test]
async fn configured_tables_and_default_are_used() {
    let mut reference = ReferenceTables::default();
    reference.hs_codes = vec![HsMapping {
        keyword: "yoga mat".to_string(),
        code: "401699".to_string(),
    }];
    let default_code = CategoryCode::parse("999999").unwrap();
    let classifier = classifier_with(MockLlm::failing(), reference, default_code);

    let mat = ProductQuery::named("Cork Yoga Mat").unwrap();
    assert_eq!(classifier.classify(&mat).await.as_str(), "401699");

    let brush = ProductQuery::named("Bamboo Toothbrush").unwrap();
    let (code, source) = classifier.classify_with_source(&brush).await;
    assert_eq!(code.as_str(), "999999");
    assert_eq!(source, ClassificationSource::Default);
}

#[tokio::test]
async fn prompt_embeds_keyword_table_and_description() {
    let llm = Arc::new(MockLlm::new().respond_when("Analyze this product", "960321"));
    let classifier = ProductClassifier::new(
        llm.clone(),
        Arc::new(ReferenceTables::default()),
        AdvisorConfig::default().default_category(),
        Duration::from_secs(5),
    );
    let product = ProductQuery::new("Eco Toothbrush", "Bamboo handle, plant-based bristles").unwrap();

    let (code, source) = classifier.classify_with_source(&product).await;
    assert_eq!(code.as_str(), "960321");
    assert_eq!(source, ClassificationSource::Model);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- organic toothpaste: 330610"));
    assert!(prompts[0].contains("Description: Bamboo handle, plant-based bristles"));
}
