//! Resource proxy: resolve a client for the request's context, run one
//! cluster operation, and shape the result.

pub mod logs;
pub mod outcome;

pub use logs::pretty_print_logs;
pub use outcome::{classify_replace, ReplaceOutcome};

use crate::cache::ClientCache;
use crate::client::{ClientFactory, EditableKind, ResourceKind};
use crate::context::{ContextList, ContextRegistry};
use crate::error::{KcError, Result};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Dispatches dashboard requests to per-context cluster clients
pub struct ResourceProxy {
    registry: ContextRegistry,
    clients: ClientCache,
    timeout: Option<Duration>,
}

impl ResourceProxy {
    pub fn new(
        registry: ContextRegistry,
        factory: Arc<dyn ClientFactory>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            registry,
            clients: ClientCache::new(factory),
            timeout,
        }
    }

    /// List all objects of a kind in a namespace
    pub async fn list(
        &self,
        context: Option<&str>,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<Value>> {
        debug!(namespace, %kind, "list");
        let api = self.clients.get(context).await?;
        self.bounded(format!("list {kind} in {namespace}"), api.list(kind, namespace))
            .await
            .inspect_err(|e| warn!(namespace, %kind, error = %e, "list failed"))
    }

    /// Full replace of a named object; a version conflict counts as success
    pub async fn replace(
        &self,
        context: Option<&str>,
        kind: EditableKind,
        namespace: &str,
        name: &str,
        body: Value,
    ) -> ReplaceOutcome {
        debug!(namespace, %kind, name, "replace");
        let result = match self.clients.get(context).await {
            Ok(api) => {
                self.bounded(
                    format!("replace {kind} {namespace}/{name}"),
                    api.replace(kind, namespace, name, body),
                )
                .await
            }
            Err(err) => Err(err),
        };

        let outcome = classify_replace(result);
        match &outcome {
            ReplaceOutcome::Conflict => {
                info!(namespace, %kind, name, "replace conflicted, ignoring")
            }
            ReplaceOutcome::Failed(e) => {
                warn!(namespace, %kind, name, error = %e, "replace failed")
            }
            ReplaceOutcome::Replaced(_) => {}
        }
        outcome
    }

    /// Pod logs with JSON lines pretty-printed
    pub async fn pod_logs(
        &self,
        context: Option<&str>,
        namespace: &str,
        name: &str,
        container: Option<&str>,
    ) -> Result<String> {
        debug!(namespace, name, container, "pod logs");
        let api = self.clients.get(context).await?;
        let raw = self
            .bounded(
                format!("logs of pod {namespace}/{name}"),
                api.pod_logs(namespace, name, container),
            )
            .await
            .inspect_err(|e| warn!(namespace, name, error = %e, "pod logs failed"))?;
        Ok(pretty_print_logs(&raw))
    }

    /// Delete a pod
    pub async fn delete_pod(
        &self,
        context: Option<&str>,
        namespace: &str,
        name: &str,
    ) -> Result<Value> {
        debug!(namespace, name, "delete pod");
        let api = self.clients.get(context).await?;
        self.bounded(
            format!("delete pod {namespace}/{name}"),
            api.delete_pod(namespace, name),
        )
        .await
        .inspect_err(|e| warn!(namespace, name, error = %e, "delete pod failed"))
    }

    /// Current context and all known contexts
    pub fn contexts(&self) -> Result<ContextList> {
        self.registry.list_contexts()
    }

    async fn bounded<T>(
        &self,
        what: String,
        call: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| KcError::Timeout(what))?,
            None => call.await,
        }
    }
}
