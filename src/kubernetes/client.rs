// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation from the ambient kubeconfig or kubeconfig text

use crate::config::Config;
use crate::error::{Error, Result};
use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config as KConfig,
};
use tracing::{debug, info, instrument};

/// Create a client for the configured context, defaulting to the release namespace
#[instrument(skip(config), fields(namespace = %config.namespace))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let mut client_config = match &config.kube_context {
        Some(context) => {
            info!("Loading kubeconfig context '{}'", context);
            let kubeconfig = Kubeconfig::read()
                .map_err(|e| Error::Kubeconfig(format!("Failed to read kubeconfig: {}", e)))?;
            from_kubeconfig(kubeconfig, Some(context)).await?
        }
        None => KConfig::infer()
            .await
            .map_err(|e| Error::Kubeconfig(format!("Failed to infer config: {}", e)))?,
    };

    debug!(
        "Using cluster {} with default namespace {}",
        client_config.cluster_url, config.namespace
    );
    client_config.default_namespace = config.namespace.clone();

    Client::try_from(client_config)
        .map_err(|e| Error::Kubeconfig(format!("Failed to create client: {}", e)))
}

/// Create a client from kubeconfig YAML, optionally selecting a context
pub async fn client_from_kubeconfig(kubeconfig: &str, context: Option<&str>) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| Error::Kubeconfig(format!("Failed to parse kubeconfig: {}", e)))?;

    let client_config = from_kubeconfig(kubeconfig_parsed, context).await?;

    Client::try_from(client_config)
        .map_err(|e| Error::Kubeconfig(format!("Failed to create client: {}", e)))
}

async fn from_kubeconfig(kubeconfig: Kubeconfig, context: Option<&str>) -> Result<KConfig> {
    let options = KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    KConfig::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| Error::Kubeconfig(format!("Failed to create config: {}", e)))
}
