//! HTTP handlers for the web API

use crate::client::{EditableKind, KubeClientFactory, ResourceKind};
use crate::config::ServerConfig;
use crate::context::{ContextList, ContextRegistry, KubeconfigSource};
use crate::error::{KcError, Result};
use crate::proxy::{ReplaceOutcome, ResourceProxy};
use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ResourceProxy>,
    pub context_header: HeaderName,
}

impl AppState {
    pub fn new(proxy: ResourceProxy, context_header: HeaderName) -> Self {
        Self {
            proxy: Arc::new(proxy),
            context_header,
        }
    }

    /// Build state backed by real Kubernetes clients
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let context_header = HeaderName::from_bytes(config.context_header.as_bytes())
            .map_err(|e| {
                KcError::Config(format!("Invalid context header '{}': {e}", config.context_header))
            })?;

        let source = match &config.kubeconfig {
            Some(path) => KubeconfigSource::File(path.clone()),
            None => KubeconfigSource::Discover,
        };
        let registry = ContextRegistry::new(source);
        let factory = Arc::new(KubeClientFactory::new(registry.clone()));
        let proxy = ResourceProxy::new(registry, factory, config.upstream_timeout());

        Ok(Self::new(proxy, context_header))
    }
}

/// Context selected by the request header; absent or empty means default.
///
/// The header is decoded as UTF-8. Bytes that do not decode are rejected
/// with 400 rather than falling back to the default context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSelector(pub Option<String>);

impl ContextSelector {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for ContextSelector {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(&state.context_header) else {
            return Ok(ContextSelector(None));
        };
        let raw = value.as_bytes();
        let name = std::str::from_utf8(raw).map_err(|_| {
            KcError::ContextNotFound(String::from_utf8_lossy(raw).into_owned())
        })?;
        let name = name.trim();
        Ok(ContextSelector((!name.is_empty()).then(|| name.to_string())))
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl From<KcError> for ApiError {
    fn from(e: KcError) -> Self {
        let status = match &e {
            KcError::ContextNotFound(_) | KcError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            KcError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => match e.upstream_status().and_then(|c| StatusCode::from_u16(c).ok()) {
                Some(code) if code.is_client_error() || code.is_server_error() => code,
                _ if matches!(e, KcError::Kube(_)) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };
        ApiError {
            status,
            error: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Deployment Handlers
// ============================================================================

/// List deployments
pub async fn list_deployments(
    State(state): State<AppState>,
    context: ContextSelector,
    Path(ns): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    list(&state, &context, ResourceKind::Deployment, &ns).await
}

/// Replace deployment
pub async fn replace_deployment(
    State(state): State<AppState>,
    context: ContextSelector,
    Path((ns, name)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<Response> {
    replace(&state, &context, EditableKind::Deployment, &ns, &name, body).await
}

// ============================================================================
// Pod Handlers
// ============================================================================

/// List pods
pub async fn list_pods(
    State(state): State<AppState>,
    context: ContextSelector,
    Path(ns): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    list(&state, &context, ResourceKind::Pod, &ns).await
}

/// Get pod logs for the pod's default container
pub async fn get_pod_logs(
    State(state): State<AppState>,
    context: ContextSelector,
    Path((ns, name)): Path<(String, String)>,
) -> ApiResult<Response> {
    pod_logs(&state, &context, &ns, &name, None).await
}

/// Get pod logs for one container
pub async fn get_container_logs(
    State(state): State<AppState>,
    context: ContextSelector,
    Path((ns, name, container)): Path<(String, String, String)>,
) -> ApiResult<Response> {
    pod_logs(&state, &context, &ns, &name, Some(&container)).await
}

/// Delete pod
pub async fn delete_pod(
    State(state): State<AppState>,
    context: ContextSelector,
    Path((ns, name)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let deleted = state
        .proxy
        .delete_pod(context.as_deref(), &ns, &name)
        .await?;
    Ok(Json(deleted))
}

// ============================================================================
// Service Handlers
// ============================================================================

/// List services
pub async fn list_services(
    State(state): State<AppState>,
    context: ContextSelector,
    Path(ns): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    list(&state, &context, ResourceKind::Service, &ns).await
}

// ============================================================================
// ConfigMap Handlers
// ============================================================================

/// List configmaps
pub async fn list_configmaps(
    State(state): State<AppState>,
    context: ContextSelector,
    Path(ns): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    list(&state, &context, ResourceKind::ConfigMap, &ns).await
}

/// Replace configmap
pub async fn replace_configmap(
    State(state): State<AppState>,
    context: ContextSelector,
    Path((ns, name)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<Response> {
    replace(&state, &context, EditableKind::ConfigMap, &ns, &name, body).await
}

// ============================================================================
// Context Handlers
// ============================================================================

/// Current context and all known contexts
pub async fn get_context(State(state): State<AppState>) -> ApiResult<Json<ContextList>> {
    Ok(Json(state.proxy.contexts()?))
}

// ============================================================================
// Shared dispatch
// ============================================================================

async fn list(
    state: &AppState,
    context: &ContextSelector,
    kind: ResourceKind,
    ns: &str,
) -> ApiResult<Json<Vec<Value>>> {
    let items = state.proxy.list(context.as_deref(), kind, ns).await?;
    Ok(Json(items))
}

async fn replace(
    state: &AppState,
    context: &ContextSelector,
    kind: EditableKind,
    ns: &str,
    name: &str,
    body: Value,
) -> ApiResult<Response> {
    match state
        .proxy
        .replace(context.as_deref(), kind, ns, name, body)
        .await
    {
        ReplaceOutcome::Replaced(updated) => Ok(Json(updated).into_response()),
        ReplaceOutcome::Conflict => Ok(StatusCode::NO_CONTENT.into_response()),
        ReplaceOutcome::Failed(e) => Err(e.into()),
    }
}

async fn pod_logs(
    state: &AppState,
    context: &ContextSelector,
    ns: &str,
    name: &str,
    container: Option<&str>,
) -> ApiResult<Response> {
    let logs = state
        .proxy
        .pod_logs(context.as_deref(), ns, name, container)
        .await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], logs).into_response())
}
