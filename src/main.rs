//! kubecle - web dashboard for Kubernetes

use anyhow::{Context, Result};
use clap::Parser;
use kubecle::cli::Cli;
use kubecle::config::load_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.log_filter());

    let mut config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);

    kubecle::web::start_server(config)
        .await
        .context("Dashboard server failed")?;

    Ok(())
}

fn setup_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
