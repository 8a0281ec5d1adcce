//! Tests for src/cache/mod.rs - ClientCache

use kubecle::cache::ClientCache;
use kubecle::error::KcError;
use std::sync::Arc;

use crate::common::FakeFactory;

fn cache() -> (Arc<FakeFactory>, Arc<ClientCache>) {
    let factory = Arc::new(FakeFactory::default());
    let cache = Arc::new(ClientCache::new(factory.clone()));
    (factory, cache)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_contexts_get_distinct_stable_clients() {
    let (factory, cache) = cache();

    let (prod, staging) = tokio::join!(
        {
            let cache = cache.clone();
            async move { cache.get(Some("prod")).await.unwrap() }
        },
        {
            let cache = cache.clone();
            async move { cache.get(Some("staging")).await.unwrap() }
        }
    );
    assert!(!Arc::ptr_eq(&prod, &staging));

    for _ in 0..5 {
        assert!(Arc::ptr_eq(&cache.get(Some("prod")).await.unwrap(), &prod));
        assert!(Arc::ptr_eq(&cache.get(Some("staging")).await.unwrap(), &staging));
    }
    assert_eq!(factory.built(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_first_calls_construct_once() {
    let (factory, cache) = cache();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get(Some("prod")).await.unwrap() })
        })
        .collect();

    let mut clients = Vec::new();
    for handle in handles {
        clients.push(handle.await.unwrap());
    }

    assert_eq!(factory.built(), 1);
    assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_default_context_is_its_own_key() {
    let (factory, cache) = cache();

    let default = cache.get(None).await.unwrap();
    let prod = cache.get(Some("prod")).await.unwrap();

    // The default resolves to "prod" but is cached separately
    assert!(!Arc::ptr_eq(&default, &prod));
    assert_eq!(factory.built(), 2);
}

#[tokio::test]
async fn test_unknown_context_fails_and_is_not_cached() {
    let (factory, cache) = cache();

    let err = cache.get(Some("dev")).await.err().unwrap();
    assert!(matches!(err, KcError::ContextNotFound(ref name) if name == "dev"));
    assert!(cache.is_empty());
    assert_eq!(factory.built(), 0);
}

#[tokio::test]
async fn test_unknown_contexts_do_not_block_later_lookups() {
    let (factory, cache) = cache();

    for i in 0..100 {
        let err = cache.get(Some(&format!("ghost-{i}"))).await.err().unwrap();
        assert!(matches!(err, KcError::ContextNotFound(_)));
    }
    cache.get(Some("prod")).await.unwrap();

    assert_eq!(factory.built(), 1);
    assert_eq!(cache.len(), 1);
}
