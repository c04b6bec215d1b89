use market_entry::analyzer::search_client::{SearchProvider, TavilySearchClient};
use market_entry::analyzer::EvidenceRetriever;
use market_entry::config::{ReferenceTables, ResultLimits};
use market_entry::error::AdvisorError;
use market_entry::models::{CategoryCode, ProductQuery, SearchDepth, SearchTopic};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn results_body(contents: &[&str]) -> String {
    let results: Vec<_> = contents
        .iter()
        .enumerate()
        .map(|(i, content)| {
            json!({
                "title": format!("Result {}", i + 1),
                "url": format!("https://example.com/{}", i + 1),
                "content": content,
                "score": 0.9
            })
        })
        .collect();

    json!({ "query": "q", "results": results }).to_string()
}

#[tokio::test]
async fn test_search_request_format() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/search")
        .match_header("authorization", "Bearer tvly-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "api_key": "tvly-test",
            "query": "tariff rate HS code 960321 Germany 2024 import duty",
            "max_results": 5,
            "search_depth": "advanced",
            "include_raw_content": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(results_body(&["Toothbrushes enter the EU duty free (0%)"]))
        .expect(1)
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let records = client
        .search(
            "tariff rate HS code 960321 Germany 2024 import duty",
            5,
            SearchDepth::Advanced,
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Result 1");
    assert_eq!(records[0].url, "https://example.com/1");
    assert_eq!(records[0].content, "Toothbrushes enter the EU duty free (0%)");
}

#[tokio::test]
async fn test_search_truncates_to_requested_count() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(results_body(&["a", "b", "c", "d"]))
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let records = client.search("anything", 2, SearchDepth::Basic).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].content, "b");
}

#[tokio::test]
async fn test_search_error_status() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/search")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let err = client.search("anything", 3, SearchDepth::Basic).await.unwrap_err();

    match err {
        AdvisorError::SearchClientError(message) => assert!(message.contains("HTTP 500"), "message: {}", message),
        other => panic!("unexpected error type: {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_body() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let result = client.search("anything", 3, SearchDepth::Basic).await;

    assert!(matches!(result, Err(AdvisorError::NetworkError(_))));
}

#[tokio::test]
async fn test_retriever_turns_http_failure_into_empty_evidence() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/search")
        .with_status(503)
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let retriever = EvidenceRetriever::new(
        Arc::new(client),
        Arc::new(ReferenceTables::default()),
        ResultLimits::default(),
        SearchDepth::Advanced,
        Duration::from_secs(10),
    );
    let product = ProductQuery::named("Bamboo Toothbrush").unwrap();

    let evidence = retriever
        .search(SearchTopic::Competitors, &product, &CategoryCode::fallback(), "UAE")
        .await;

    assert!(evidence.is_empty());
    assert_eq!(evidence.topic, Some(SearchTopic::Competitors));
    assert_eq!(evidence.country, "UAE");
}

#[tokio::test]
async fn test_retriever_sends_topic_limit() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/search")
        .match_body(Matcher::PartialJson(json!({
            "query": "distributors importers 960321 sustainable Canada",
            "max_results": 10,
            "search_depth": "basic"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(results_body(&["SustainCo imports eco goods"]))
        .expect(1)
        .create_async()
        .await;

    let client = TavilySearchClient::new(&server.url(), Some("tvly-test".to_string()), 10).unwrap();
    let retriever = EvidenceRetriever::new(
        Arc::new(client),
        Arc::new(ReferenceTables::default()),
        ResultLimits::default(),
        SearchDepth::Basic,
        Duration::from_secs(10),
    );
    let product = ProductQuery::named("Bamboo Toothbrush").unwrap();

    let evidence = retriever
        .search(SearchTopic::Partners, &product, &CategoryCode::fallback(), "Canada")
        .await;

    mock.assert_async().await;
    assert_eq!(evidence.first_content(), Some("SustainCo imports eco goods"));
}
