//! Per-context client cache

use crate::client::{ClientFactory, SharedClusterApi};
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Lazily built, never evicted clients keyed by context.
///
/// The key `None` is the ambient default context. Each key owns a
/// `OnceCell`, so concurrent first requests for the same context wait on a
/// single construction instead of racing. A failed construction removes the
/// key again, so unknown selectors do not accumulate.
pub struct ClientCache {
    factory: Arc<dyn ClientFactory>,
    clients: DashMap<Option<String>, Arc<OnceCell<SharedClusterApi>>>,
}

impl ClientCache {
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            clients: DashMap::new(),
        }
    }

    /// Get the client for a context, building it on first use
    pub async fn get(&self, context: Option<&str>) -> Result<SharedClusterApi> {
        let key = context.map(String::from);
        // Clone the cell out so no map shard lock is held across the await.
        let cell = self.clients.entry(key.clone()).or_default().clone();

        let result = cell
            .get_or_try_init(|| async {
                debug!(context = context.unwrap_or("<default>"), "Client cache miss");
                self.factory.connect(context).await
            })
            .await;

        match result {
            Ok(client) => Ok(Arc::clone(client)),
            Err(e) => {
                // Drop the empty cell unless another request is still waiting on it.
                self.clients.remove_if(&key, |_, c| {
                    !c.initialized() && Arc::ptr_eq(c, &cell) && Arc::strong_count(c) <= 2
                });
                Err(e)
            }
        }
    }

    /// Number of contexts with a constructed client
    pub fn len(&self) -> usize {
        self.clients
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Check if no client has been constructed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
