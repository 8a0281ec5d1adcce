//! Web server implementation using axum

use crate::config::ServerConfig;
use crate::error::Result;
use crate::web::handlers::{self, AppState};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API router; everything outside `/api` is served from `static_dir`
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/namespace/{ns}/deployments", get(handlers::list_deployments))
        .route(
            "/api/namespace/{ns}/deployments/{name}",
            post(handlers::replace_deployment),
        )
        .route("/api/namespace/{ns}/pods", get(handlers::list_pods))
        .route(
            "/api/namespace/{ns}/pods/{name}",
            delete(handlers::delete_pod),
        )
        .route("/api/namespace/{ns}/pods/{name}/logs", get(handlers::get_pod_logs))
        .route(
            "/api/namespace/{ns}/pods/{name}/logs/{container}",
            get(handlers::get_container_logs),
        )
        .route("/api/namespace/{ns}/services", get(handlers::list_services))
        .route("/api/namespace/{ns}/configmaps", get(handlers::list_configmaps))
        .route(
            "/api/namespace/{ns}/configmaps/{name}",
            post(handlers::replace_configmap),
        )
        .route("/api/context", get(handlers::get_context))
        .fallback_service(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the dashboard server and run until Ctrl-C
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config)?;
    let app = build_router(state, &config.static_dir);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Kubecle listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
