//! Kubernetes client abstraction

use crate::context::ContextRegistry;
use crate::error::{KcError, Result};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Pod, Service};
use k8s_openapi::NamespaceResourceScope;
use kube::api::{DeleteParams, ListParams, LogParams, PostParams};
use kube::{Api, Client, Resource};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::info;

/// Resource kinds the dashboard exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Pod,
    Service,
    ConfigMap,
}

impl ResourceKind {
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployments",
            ResourceKind::Pod => "pods",
            ResourceKind::Service => "services",
            ResourceKind::ConfigMap => "configmaps",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Kinds the dashboard edits and writes back with a full replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableKind {
    Deployment,
    ConfigMap,
}

impl From<EditableKind> for ResourceKind {
    fn from(kind: EditableKind) -> Self {
        match kind {
            EditableKind::Deployment => ResourceKind::Deployment,
            EditableKind::ConfigMap => ResourceKind::ConfigMap,
        }
    }
}

impl fmt::Display for EditableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&ResourceKind::from(*self), f)
    }
}

/// Namespaced operations against one cluster.
///
/// Resources travel as raw JSON exactly as the API server returns them.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List every object of `kind` in `namespace`
    async fn list(&self, kind: ResourceKind, namespace: &str) -> Result<Vec<Value>>;

    /// Full replace (PUT) of a named object
    async fn replace(
        &self,
        kind: EditableKind,
        namespace: &str,
        name: &str,
        body: Value,
    ) -> Result<Value>;

    /// Raw log text of a pod, optionally for a single container
    async fn pod_logs(
        &self,
        namespace: &str,
        name: &str,
        container: Option<&str>,
    ) -> Result<String>;

    /// Delete a pod, returning the deleted object or the server's status
    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<Value>;
}

/// Shared handle to a cluster client
pub type SharedClusterApi = Arc<dyn ClusterApi>;

/// Builds cluster clients for a context
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// `None` means the ambient default context
    async fn connect(&self, context: Option<&str>) -> Result<SharedClusterApi>;
}

/// `ClusterApi` over a kube `Client`
#[derive(Clone)]
pub struct KubeClusterApi {
    client: Client,
}

impl KubeClusterApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api<K>(&self, namespace: &str) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        <K as Resource>::DynamicType: Default,
    {
        Api::namespaced(self.client.clone(), namespace)
    }
}

async fn list_raw<K>(api: Api<K>) -> Result<Vec<Value>>
where
    K: Resource + Clone + Debug + DeserializeOwned + Serialize,
{
    let list = api.list(&ListParams::default()).await?;
    list.items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(KcError::from))
        .collect()
}

async fn replace_raw<K>(api: Api<K>, name: &str, body: Value) -> Result<Value>
where
    K: Resource + Clone + Debug + DeserializeOwned + Serialize,
{
    let object: K =
        serde_json::from_value(body).map_err(|e| KcError::InvalidBody(e.to_string()))?;
    let updated = api.replace(name, &PostParams::default(), &object).await?;
    Ok(serde_json::to_value(updated)?)
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    async fn list(&self, kind: ResourceKind, namespace: &str) -> Result<Vec<Value>> {
        match kind {
            ResourceKind::Deployment => list_raw(self.api::<Deployment>(namespace)).await,
            ResourceKind::Pod => list_raw(self.api::<Pod>(namespace)).await,
            ResourceKind::Service => list_raw(self.api::<Service>(namespace)).await,
            ResourceKind::ConfigMap => list_raw(self.api::<ConfigMap>(namespace)).await,
        }
    }

    async fn replace(
        &self,
        kind: EditableKind,
        namespace: &str,
        name: &str,
        body: Value,
    ) -> Result<Value> {
        match kind {
            EditableKind::Deployment => {
                replace_raw(self.api::<Deployment>(namespace), name, body).await
            }
            EditableKind::ConfigMap => {
                replace_raw(self.api::<ConfigMap>(namespace), name, body).await
            }
        }
    }

    async fn pod_logs(
        &self,
        namespace: &str,
        name: &str,
        container: Option<&str>,
    ) -> Result<String> {
        let lp = LogParams {
            container: container.map(String::from),
            ..Default::default()
        };
        Ok(self.api::<Pod>(namespace).logs(name, &lp).await?)
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<Value> {
        let deleted = self
            .api::<Pod>(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        let value = deleted.either(serde_json::to_value, serde_json::to_value)?;
        Ok(value)
    }
}

/// Builds `KubeClusterApi` clients from the context registry
pub struct KubeClientFactory {
    registry: ContextRegistry,
}

impl KubeClientFactory {
    pub fn new(registry: ContextRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl ClientFactory for KubeClientFactory {
    async fn connect(&self, context: Option<&str>) -> Result<SharedClusterApi> {
        let config = self.registry.resolve(context).await?;
        let client = Client::try_from(config)?;
        info!(context = context.unwrap_or("<default>"), "Created Kubernetes client");
        Ok(Arc::new(KubeClusterApi::new(client)))
    }
}
