//! Integration tests for Kubernetes client operations
//!
//! These tests require a real Kubernetes cluster.

use kubecle::client::{ClientFactory, KubeClientFactory, ResourceKind};
use kubecle::context::{ContextRegistry, KubeconfigSource};
use kubecle::error::KcError;

fn factory() -> KubeClientFactory {
    KubeClientFactory::new(ContextRegistry::new(KubeconfigSource::Discover))
}

/// Test creating a client with the default context
#[tokio::test]
#[ignore]
async fn test_connect_default_context() {
    let client = factory().connect(None).await;
    assert!(client.is_ok(), "Should create client with default context");
}

/// Test creating a client for the kubeconfig's current context by name
#[tokio::test]
#[ignore]
async fn test_connect_current_context_by_name() {
    let contexts = ContextRegistry::new(KubeconfigSource::Discover)
        .list_contexts()
        .expect("Should read kubeconfig");
    let current = contexts.current_context.expect("Should have current context");

    let client = factory().connect(Some(&current)).await;
    assert!(client.is_ok(), "Should create client for named context");
}

/// Test creating a client with a non-existent context
#[tokio::test]
#[ignore]
async fn test_connect_nonexistent_context() {
    let result = factory().connect(Some("nonexistent-context-12345")).await;
    assert!(matches!(result, Err(KcError::ContextNotFound(_))));
}

/// Test listing pods in kube-system
#[tokio::test]
#[ignore]
async fn test_list_kube_system_pods() {
    let api = factory().connect(None).await.expect("Should connect");
    let pods = api
        .list(ResourceKind::Pod, "kube-system")
        .await
        .expect("Should list pods");

    assert!(!pods.is_empty(), "kube-system should have pods");
    assert!(pods.iter().all(|p| p["metadata"]["namespace"] == "kube-system"));
}

/// Test deleting a pod that does not exist
#[tokio::test]
#[ignore]
async fn test_delete_missing_pod_is_not_found() {
    let api = factory().connect(None).await.expect("Should connect");
    let err = api
        .delete_pod("default", "kubecle-nonexistent-pod-12345")
        .await
        .err()
        .expect("Delete should fail");

    assert_eq!(err.upstream_status(), Some(404));
}
