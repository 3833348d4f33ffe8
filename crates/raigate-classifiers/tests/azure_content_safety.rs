//! HTTP-level tests for the Azure content-safety backend
//!
//! Verifies against a mock server:
//! - Request path, query string, and subscription-key header
//! - Severity parsing and threshold evaluation end to end
//! - Non-success status mapped to an error and resolved by the fail policy
//! - Client timeouts resolved the same way

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use raigate_classifiers::{
    AzureContentSafetyClient, Classifier, ContentSafetyClassifier, ContentSafetyConfig,
    FailurePolicy, HarmCategory, ModerationBackend,
};
use raigate_core::Error;

fn analysis(hate: u8, sexual: u8, violence: u8, self_harm: u8) -> serde_json::Value {
    serde_json::json!({
        "blocklistsMatch": [],
        "categoriesAnalysis": [
            {"category": "Hate", "severity": hate},
            {"category": "SelfHarm", "severity": self_harm},
            {"category": "Sexual", "severity": sexual},
            {"category": "Violence", "severity": violence}
        ]
    })
}

#[tokio::test]
async fn analyze_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .and(query_param("api-version", "2023-10-01"))
        .and(header("Ocp-Apim-Subscription-Key", "cs-key"))
        .and(body_partial_json(serde_json::json!({"text": "How do I hack into the payroll system?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis(0, 0, 4, 0)))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureContentSafetyClient::new(server.uri(), "cs-key");
    let scores = client
        .analyze("How do I hack into the payroll system?")
        .await
        .unwrap();

    assert_eq!(scores.severity(HarmCategory::Violence), 4);
    assert_eq!(scores.severity(HarmCategory::Hate), 0);
}

#[tokio::test]
async fn classifier_blocks_on_service_severity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis(0, 0, 0, 2)))
        .mount(&server)
        .await;

    let backend = Arc::new(AzureContentSafetyClient::new(server.uri(), "cs-key"));
    let classifier = ContentSafetyClassifier::new(backend, ContentSafetyConfig::default()).unwrap();

    let verdict = classifier.classify("some text").await;
    assert!(!verdict.is_safe);
    assert_eq!(
        verdict.reason.as_deref(),
        Some("Content blocked: self_harm detected")
    );
}

#[tokio::test]
async fn unauthorized_maps_to_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .respond_with(ResponseTemplate::new(401).set_body_string("access denied"))
        .mount(&server)
        .await;

    let client = AzureContentSafetyClient::new(server.uri(), "wrong-key");
    let err = client.analyze("hello").await.unwrap_err();

    match err {
        Error::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert_eq!(body, "access denied");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn service_error_resolved_by_fail_policy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = Arc::new(AzureContentSafetyClient::new(server.uri(), "cs-key"));

    let open = ContentSafetyClassifier::new(backend.clone(), ContentSafetyConfig::default()).unwrap();
    assert!(open.classify("hello").await.is_safe);

    let closed = ContentSafetyClassifier::new(
        backend,
        ContentSafetyConfig {
            on_error: FailurePolicy::Closed,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(!closed.classify("hello").await.is_safe);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AzureContentSafetyClient::new(server.uri(), "cs-key");
    let err = client.analyze("hello").await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn slow_service_times_out_and_follows_fail_policy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/contentsafety/text:analyze"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analysis(6, 6, 6, 6))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let backend = Arc::new(AzureContentSafetyClient::with_client(http, server.uri(), "cs-key"));

    let err = backend.analyze("hello").await.unwrap_err();
    assert!(matches!(err, Error::Timeout));

    let open = ContentSafetyClassifier::new(backend.clone(), ContentSafetyConfig::default()).unwrap();
    let verdict = open.classify("hello").await;
    assert!(verdict.is_safe);

    let closed = ContentSafetyClassifier::new(
        backend,
        ContentSafetyConfig {
            on_error: FailurePolicy::Closed,
            ..Default::default()
        },
    )
    .unwrap();
    let verdict = closed.classify("hello").await;
    assert!(!verdict.is_safe);
    assert_eq!(verdict.reason.as_deref(), Some("Content Safety unavailable"));
}
