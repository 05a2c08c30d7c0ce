//! Dataset fetch over HTTP
//!
//! Exercises `fetch` and `load` against a wiremock server:
//! - Successful documents are normalized
//! - Non-success responses, empty lists and malformed bodies fall back

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::data_source::{fetch, load, DataError, DataLocation, DataOrigin};
use crate::core::fixtures::fallback_dataset;
use crate::core::model::Confidence;
use crate::tests::common::create_test_document;

async fn serve(template: ResponseTemplate) -> (MockServer, DataLocation) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(template)
        .mount(&server)
        .await;
    let location = DataLocation::parse(&format!("{}/data.json", server.uri()));
    (server, location)
}

#[tokio::test]
async fn test_fetch_normalizes_document() {
    let (_server, location) =
        serve(ResponseTemplate::new(200).set_body_json(create_test_document())).await;

    let dataset = fetch(&location).await.unwrap();
    assert_eq!(dataset.len(), 2);

    let alpha = dataset.get("alpha").unwrap();
    assert_eq!(alpha.confidence, Confidence::Directional);
    assert_eq!(alpha.aum, Some(850.0));
    assert_eq!(alpha.trend_psi.len(), 3);

    // `confidenceLabel` is accepted and unified.
    let beta = dataset.get("beta").unwrap();
    assert_eq!(beta.confidence, Confidence::Robust);
    assert_eq!(beta.kpis.psi, None);
    assert!(beta.trend_crowding.is_empty());
}

#[tokio::test]
async fn test_not_found_falls_back() {
    let (_server, location) = serve(ResponseTemplate::new(404)).await;

    assert!(matches!(fetch(&location).await, Err(DataError::Status(404))));

    let outcome = load(&location).await;
    assert!(outcome.origin.is_fallback());
    assert_eq!(&outcome.dataset, fallback_dataset());
}

#[tokio::test]
async fn test_empty_list_falls_back() {
    let (_server, location) =
        serve(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "portfolios": [] })))
            .await;

    assert!(matches!(fetch(&location).await, Err(DataError::Empty)));
    let outcome = load(&location).await;
    assert!(outcome.origin.is_fallback());
    assert_eq!(outcome.dataset.first().map(|p| p.id.as_str()), Some("internal"));
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let (_server, location) =
        serve(ResponseTemplate::new(200).set_body_string("{ \"portfolios\": [")).await;

    assert!(matches!(fetch(&location).await, Err(DataError::Parse(_))));
    assert!(load(&location).await.origin.is_fallback());
}

#[tokio::test]
async fn test_success_reports_document_origin() {
    let (_server, location) =
        serve(ResponseTemplate::new(200).set_body_json(create_test_document())).await;

    let outcome = load(&location).await;
    assert_eq!(outcome.origin, DataOrigin::Document(location.to_string()));
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    let server = MockServer::start().await;
    let location = DataLocation::parse(&format!("{}/data.json", server.uri()));
    drop(server);

    let outcome = load(&location).await;
    assert!(outcome.origin.is_fallback());
}
