//! Web API for the kubecle dashboard
//!
//! Serves the resource proxy endpoints under `/api` and the built
//! dashboard frontend for every other path.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server};
