//! `newsletter.subscribe` end to end.

use reqwest::StatusCode;
use serde_json::json;

use scalebreakers_integration_tests::TestApp;

#[tokio::test]
async fn duplicate_subscription_conflicts() {
    let app = TestApp::spawn().await;
    let client = app.anonymous();
    let input = json!({ "email": "fan@example.com", "name": "Fan" });

    let (status, body) = client.mutate("newsletter.subscribe", &input).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = client.mutate("newsletter.subscribe", &input).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(body["error"]["message"], "Email already subscribed");

    let subscribers = app.store.subscribers().await;
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers.first().map(|s| s.email.as_str()), Some("fan@example.com"));
}

#[tokio::test]
async fn email_is_normalized_before_uniqueness_check() {
    let app = TestApp::spawn().await;
    let client = app.anonymous();

    let (status, _) = client
        .mutate("newsletter.subscribe", &json!({ "email": "Fan@Example.com" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client
        .mutate("newsletter.subscribe", &json!({ "email": "  fan@example.com " }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.store.subscribers().await.len(), 1);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .anonymous()
        .mutate("newsletter.subscribe", &json!({ "email": "not-an-email" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["field"], "email");
    assert!(app.store.subscribers().await.is_empty());
}

#[tokio::test]
async fn store_failure_is_internal() {
    let app = TestApp::spawn().await;
    app.store.set_unavailable(true);

    let (status, body) = app
        .anonymous()
        .mutate("newsletter.subscribe", &json!({ "email": "fan@example.com" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
    assert_eq!(body["error"]["message"], "Failed to subscribe to newsletter");
}
