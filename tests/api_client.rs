//! Contract tests for the monitoring API client
//!
//! Every property the client promises about request shape and response
//! handling is pinned here against a mock server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_cli::{ApiClient, ApiError, NewEndpoint};

fn client(uri: &str) -> ApiClient {
    ApiClient::new(uri, 5).unwrap()
}

// ==================== Health check ====================

#[tokio::test]
async fn check_reports_the_response_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints/ep-7/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response_time": 123})))
        .mount(&server)
        .await;

    let report = client(&server.uri()).check_endpoint("ep-7").await.unwrap();
    assert_eq!(report.response_time, 123.0);
}

#[tokio::test]
async fn check_scenario_ep42() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints/ep-42/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response_time": 87})))
        .mount(&server)
        .await;

    let report = client(&server.uri()).check_endpoint("ep-42").await.unwrap();
    assert_eq!(
        sentinel_cli::utils::format_response_time(report.response_time),
        "87"
    );
}

#[tokio::test]
async fn check_server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints/ep-7/check"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server.uri()).check_endpoint("ep-7").await.unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
}

#[tokio::test]
async fn check_missing_response_time_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints/ep-7/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let err = client(&server.uri()).check_endpoint("ep-7").await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn check_non_numeric_response_time_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints/ep-7/check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response_time": "87"})))
        .mount(&server)
        .await;

    let err = client(&server.uri()).check_endpoint("ep-7").await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn check_unreachable_server_is_a_network_error() {
    // Nothing listens on port 1
    let err = client("http://127.0.0.1:1")
        .check_endpoint("ep-7")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

// ==================== Deletion ====================

#[tokio::test]
async fn delete_succeeds_only_on_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/endpoints/ep-42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client(&server.uri()).delete_endpoint("ep-42").await.is_ok());
}

#[tokio::test]
async fn delete_plain_200_is_incomplete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/endpoints/ep-42"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client(&server.uri()).delete_endpoint("ep-42").await.unwrap_err();
    assert!(matches!(err, ApiError::DeleteIncomplete(s) if s.as_u16() == 200));
}

#[tokio::test]
async fn delete_404_is_incomplete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/endpoints/ep-42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client(&server.uri()).delete_endpoint("ep-42").await.unwrap_err();
    assert!(matches!(err, ApiError::DeleteIncomplete(s) if s.as_u16() == 404));
}

// ==================== Creation ====================

#[tokio::test]
async fn create_posts_fields_in_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/endpoints"))
        .and(body_json(json!({
            "name": "billing-api-prod",
            "url": "https://billing.example.com/health",
            "method": "GET",
            "expected_status": 200
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = NewEndpoint {
        name: "billing-api-prod".to_string(),
        url: "https://billing.example.com/health".to_string(),
        method: "GET".to_string(),
        expected_status: 200,
    };

    assert!(client(&server.uri()).create_endpoint(&endpoint).await.is_ok());
}

#[tokio::test]
async fn create_rejection_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/endpoints"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let endpoint = NewEndpoint {
        name: "billing-api-prod".to_string(),
        url: "https://billing.example.com/health".to_string(),
        method: "GET".to_string(),
        expected_status: 200,
    };

    let err = client(&server.uri())
        .create_endpoint(&endpoint)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 422));
}

// ==================== Listing ====================

#[tokio::test]
async fn list_parses_full_and_minimal_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "ep-1",
                "name": "billing-api-prod",
                "url": "https://billing.example.com/health",
                "method": "POST",
                "expected_status": 201,
                "last_check": "2024-05-01T12:30:00Z",
                "last_status": 201,
                "is_healthy": true
            },
            {
                "id": "ep-2",
                "name": "payments-gateway",
                "url": "https://payments.example.com"
            }
        ])))
        .mount(&server)
        .await;

    let endpoints = client(&server.uri()).list_endpoints().await.unwrap();
    assert_eq!(endpoints.len(), 2);

    assert_eq!(endpoints[0].method, "POST");
    assert_eq!(endpoints[0].last_status, Some(201));
    assert!(endpoints[0].is_healthy);

    // Never-checked endpoint falls back to server defaults
    assert_eq!(endpoints[1].method, "GET");
    assert_eq!(endpoints[1].expected_status, 200);
    assert!(endpoints[1].last_check.is_none());
    assert!(!endpoints[1].is_healthy);
}

#[tokio::test]
async fn list_with_non_array_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"endpoints": []})))
        .mount(&server)
        .await;

    let err = client(&server.uri()).list_endpoints().await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}
