//! HTTP API tests against an in-memory cluster

mod configmaps_test;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use axum::{
    body::Body,
    http::{HeaderName, Request, Response, StatusCode},
    Router,
};
use common::{test_registry, FakeFactory};
use kubecle::proxy::ResourceProxy;
use kubecle::web::{build_router, handlers::AppState};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

pub const CONTEXT_HEADER: &str = "k8s-context";

/// Router wired to a `FakeFactory`, plus the static dir it serves
pub struct TestApp {
    pub factory: Arc<FakeFactory>,
    pub router: Router,
    _static_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let factory = Arc::new(FakeFactory::default());
        let proxy = ResourceProxy::new(
            test_registry(),
            factory.clone(),
            Some(Duration::from_secs(5)),
        );
        let state = AppState::new(proxy, HeaderName::from_static(CONTEXT_HEADER));

        let static_dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(static_dir.path().join("index.html"), "<html>kubecle</html>")
            .expect("write index.html");

        Self {
            factory,
            router: build_router(state, static_dir.path()),
            _static_dir: static_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, context: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, context, Body::empty())).await
    }
}

pub fn request(method: &str, uri: &str, context: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(context) = context {
        builder = builder.header(CONTEXT_HEADER, context);
    }
    builder.body(body).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Test that non-API paths serve the frontend
#[tokio::test]
async fn test_frontend_fallback() {
    let app = TestApp::new();

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<html>kubecle</html>");

    let response = app.get("/deployments", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<html>kubecle</html>");
}
