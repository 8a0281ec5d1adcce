//! Server configuration for kubecle

use crate::error::{KcError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Header the dashboard frontend uses to select a context
pub const DEFAULT_CONTEXT_HEADER: &str = "k8s-context";

/// Server configuration stored in ~/.kubecle/config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    pub bind: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// Directory holding the built dashboard frontend
    pub static_dir: PathBuf,

    /// Kubeconfig file; standard discovery is used when unset
    pub kubeconfig: Option<PathBuf>,

    /// Upper bound for a single cluster call in seconds (0 disables it)
    pub upstream_timeout_secs: u64,

    /// Request header carrying the context selector
    pub context_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 6888,
            static_dir: PathBuf::from("client/dist"),
            kubeconfig: None,
            upstream_timeout_secs: 30,
            context_header: DEFAULT_CONTEXT_HEADER.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        match self.upstream_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

/// Get the kubecle config directory (~/.kubecle)
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".kubecle"))
        .ok_or_else(|| KcError::Config("Could not determine home directory".to_string()))
}

/// Load server config.
///
/// An explicit `path` must exist. Without one, ~/.kubecle/config.toml is
/// read when present and defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => read_config(path),
        None => {
            let path = match config_dir() {
                Ok(dir) => dir.join("config.toml"),
                Err(_) => return Ok(ServerConfig::default()),
            };
            if path.exists() {
                read_config(&path)
            } else {
                Ok(ServerConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<ServerConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        KcError::Config(format!("Failed to read {}: {e}", path.display()))
    })?;
    Ok(toml::from_str(&content)?)
}
