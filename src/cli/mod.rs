//! Command line definitions using clap

use crate::config::ServerConfig;
use clap::{ArgAction, Parser};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "kubecle",
    version,
    about = "Web dashboard for browsing and editing Kubernetes resources",
    long_about = None,
)]
pub struct Cli {
    /// Config file (defaults to ~/.kubecle/config.toml when present)
    #[arg(short = 'c', long, env = "KUBECLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "KUBECLE_BIND")]
    pub bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(short = 'p', long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory with the built dashboard frontend
    #[arg(long, env = "KUBECLE_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Kubeconfig file to read contexts from
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Seconds to wait for a cluster call (0 waits forever)
    #[arg(long = "timeout", env = "KUBECLE_TIMEOUT")]
    pub timeout_secs: Option<u64>,

    /// Request header that selects the context
    #[arg(long, env = "KUBECLE_CONTEXT_HEADER")]
    pub context_header: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overlay flags that were given on top of file/default configuration
    pub fn apply(&self, config: &mut ServerConfig) {
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = &self.static_dir {
            config.static_dir = dir.clone();
        }
        if let Some(path) = &self.kubeconfig {
            config.kubeconfig = Some(path.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.upstream_timeout_secs = secs;
        }
        if let Some(header) = &self.context_header {
            config.context_header = header.clone();
        }
    }

    /// Default log filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn,kubecle=info",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
