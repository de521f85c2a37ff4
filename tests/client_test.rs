//! HTTP client tests against a mock backend

mod common;

use common::{result_json, setup_mock_server, suggestion_json};
use mycosoft_search::{SearchClient, SearchConfig, SearchError};
use serde_json::json;

fn client_for(url: &str) -> SearchClient {
    let config = SearchConfig::new(url).expect("config");
    SearchClient::new(&config)
}

#[tokio::test]
async fn results_filter_out_invalid_entries() {
    let mut server = setup_mock_server().await;
    // One well-formed entry, one missing its url
    let body = json!({
        "results": [
            result_json("hericium-erinaceus", "Lion's Mane"),
            { "id": "broken", "title": "No url here", "type": "fungi" },
        ]
    });
    let mock = common::create_json_mock(&mut server, "/api/search", &body).await;

    let results = client_for(&server.url())
        .fetch_results("lion's mane")
        .await
        .expect("results");

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "hericium-erinaceus");
    assert_eq!(results[0].result_type, "fungi");
}

#[tokio::test]
async fn blank_query_returns_empty_without_network() {
    let mut server = setup_mock_server().await;
    let mock = server
        .mock("GET", "/api/search")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let results = client_for(&server.url())
        .fetch_results("   ")
        .await
        .expect("results");

    mock.assert_async().await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn status_codes_map_to_fixed_messages() {
    for (status, message) in [
        (404, "No results found"),
        (429, "Too many requests. Please try again later."),
        (500, "Server error. Please try again later."),
    ] {
        let mut server = setup_mock_server().await;
        let _mock = common::create_error_mock(&mut server, "/api/search", status).await;

        let err = client_for(&server.url())
            .fetch_results("reishi")
            .await
            .expect_err("error");
        assert_eq!(err.user_message(), message);
    }
}

#[tokio::test]
async fn error_payload_surfaces_backend_message() {
    let mut server = setup_mock_server().await;
    let body = json!({ "error": "Index temporarily offline" });
    let _mock = common::create_json_mock(&mut server, "/api/search", &body).await;

    let err = client_for(&server.url())
        .fetch_results("reishi")
        .await
        .expect_err("error");

    assert!(matches!(err, SearchError::Api(_)));
    assert_eq!(err.user_message(), "Index temporarily offline");
}

#[tokio::test]
async fn non_array_results_are_invalid_response() {
    let mut server = setup_mock_server().await;
    let body = json!({ "results": "definitely not an array" });
    let _mock = common::create_json_mock(&mut server, "/api/search", &body).await;

    let err = client_for(&server.url())
        .fetch_results("reishi")
        .await
        .expect_err("error");

    assert!(matches!(err, SearchError::InvalidResponse));
    assert_eq!(err.user_message(), "Invalid response format");
}

#[tokio::test]
async fn short_suggestion_query_never_hits_network() {
    let mut server = setup_mock_server().await;
    let mock = server
        .mock("GET", "/api/search/suggestions")
        .match_query(mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server.url())
        .fetch_suggestions("a")
        .await
        .expect_err("rejected");

    mock.assert_async().await;
    assert!(matches!(err, SearchError::QueryTooShort));
    assert_eq!(err.user_message(), "Please enter at least 2 characters");
}

#[tokio::test]
async fn suggestions_partial_success_keeps_valid_entries() {
    let mut server = setup_mock_server().await;
    let body = json!({
        "suggestions": [
            suggestion_json("reishi", "Reishi", "fungi"),
            { "id": "broken", "type": "fungi" },
            suggestion_json("reishi-article", "Growing Reishi", "article"),
        ],
        "message": "2 of 3 valid",
    });
    let _mock = common::create_json_mock(&mut server, "/api/search/suggestions", &body).await;

    let suggestions = client_for(&server.url())
        .fetch_suggestions("reishi")
        .await
        .expect("suggestions");

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].id, "reishi");
    assert_eq!(suggestions[1].id, "reishi-article");
}

#[tokio::test]
async fn suggestion_kind_decodes_from_lowercase_tag() {
    let mut server = setup_mock_server().await;
    let body = json!({
        "suggestions": [{
            "id": "ganoderma-lucidum",
            "title": "Reishi",
            "type": "fungi",
            "scientificName": "Ganoderma lucidum",
            "url": "/species/ganoderma-lucidum",
        }]
    });
    let _mock = common::create_json_mock(&mut server, "/api/search/suggestions", &body).await;

    let suggestions = client_for(&server.url())
        .fetch_suggestions("ganoderma")
        .await
        .expect("suggestions");

    assert_eq!(suggestions.len(), 1);
    assert_eq!(
        suggestions[0].kind,
        mycosoft_search::SuggestionKind::Fungi
    );
    assert_eq!(
        suggestions[0].scientific_name.as_deref(),
        Some("Ganoderma lucidum")
    );
}
