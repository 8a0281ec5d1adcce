//! Context registry backed by a kubeconfig

use crate::error::{KcError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Where kubeconfig data comes from
#[derive(Debug, Clone)]
pub enum KubeconfigSource {
    /// `KUBECONFIG` or ~/.kube/config, in-cluster config for the default context
    Discover,
    /// An explicit kubeconfig file
    File(PathBuf),
    /// An already parsed kubeconfig
    Loaded(Kubeconfig),
}

/// Current context plus every known context name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextList {
    pub current_context: Option<String>,
    pub contexts: Vec<String>,
}

/// Read-only view over the available cluster contexts
#[derive(Debug, Clone)]
pub struct ContextRegistry {
    source: KubeconfigSource,
}

impl ContextRegistry {
    pub fn new(source: KubeconfigSource) -> Self {
        Self { source }
    }

    pub fn from_kubeconfig(kubeconfig: Kubeconfig) -> Self {
        Self::new(KubeconfigSource::Loaded(kubeconfig))
    }

    /// Read the kubeconfig. Files are re-read on every call.
    pub fn load(&self) -> Result<Kubeconfig> {
        match &self.source {
            KubeconfigSource::Discover => Kubeconfig::read()
                .map_err(|e| KcError::ConfigLoad(e.to_string())),
            KubeconfigSource::File(path) => Kubeconfig::read_from(path)
                .map_err(|e| KcError::ConfigLoad(format!("{}: {e}", path.display()))),
            KubeconfigSource::Loaded(kubeconfig) => Ok(kubeconfig.clone()),
        }
    }

    /// Report the active context and all context names in file order
    pub fn list_contexts(&self) -> Result<ContextList> {
        let kubeconfig = self.load()?;
        Ok(ContextList {
            current_context: kubeconfig.current_context,
            contexts: kubeconfig.contexts.into_iter().map(|ctx| ctx.name).collect(),
        })
    }

    /// Build client configuration for a context.
    ///
    /// `None` selects the ambient default: the kubeconfig's current context,
    /// or in-cluster configuration when discovering and no kubeconfig exists.
    pub async fn resolve(&self, context: Option<&str>) -> Result<Config> {
        let Some(name) = context else {
            debug!("Resolving default context");
            return match &self.source {
                KubeconfigSource::Discover => Config::infer()
                    .await
                    .map_err(|e| KcError::ConfigLoad(e.to_string())),
                _ => build_config(self.load()?, None).await,
            };
        };

        let kubeconfig = self.load()?;
        if !kubeconfig.contexts.iter().any(|ctx| ctx.name == name) {
            return Err(KcError::ContextNotFound(name.to_string()));
        }
        debug!(context = name, "Resolving named context");
        build_config(kubeconfig, Some(name)).await
    }
}

async fn build_config(kubeconfig: Kubeconfig, context: Option<&str>) -> Result<Config> {
    let options = KubeConfigOptions {
        context: context.map(String::from),
        ..Default::default()
    };
    Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| KcError::ConfigLoad(e.to_string()))
}
