//! kubecle - web dashboard proxy for Kubernetes resources across contexts

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod proxy;
pub mod web;
