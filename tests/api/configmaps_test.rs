//! Tests for configmap endpoints

use super::{body_bytes, body_json, request, TestApp};
use axum::{body::Body, http::StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_list_configmaps() {
    let app = TestApp::new();

    let response = app.get("/api/namespace/web/configmaps", Some("staging")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["kind"], "configmaps");
}

#[tokio::test]
async fn test_replace_configmap() {
    let app = TestApp::new();
    let configmap = json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": { "name": "settings", "namespace": "web" },
        "data": { "LOG_LEVEL": "debug" }
    });

    let response = app
        .send(request(
            "POST",
            "/api/namespace/web/configmaps/settings",
            None,
            Body::from(configmap.to_string()),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, configmap);
}

#[tokio::test]
async fn test_replace_configmap_conflict_is_success() {
    let app = TestApp::new();

    let response = app
        .send(request(
            "POST",
            "/api/namespace/web/configmaps/conflicted",
            None,
            Body::from(json!({"kind": "ConfigMap"}).to_string()),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());
}
