// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, labels, DEFAULT_MAX_OWNER_DEPTH, DEFAULT_NAMESPACE};
use crate::ownership::ResolverConfig;
use anyhow::{bail, Context, Result};
use std::env;

/// Library configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace the release lives in
    pub namespace: String,
    pub max_owner_depth: usize,
    /// Label consulted when an object carries no usable owner references
    pub instance_label: String,
    /// Kubeconfig context to use instead of the current one
    pub kube_context: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let namespace = lookup(vars::NAMESPACE)
            .or_else(|| lookup(vars::POD_NAMESPACE))
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let max_owner_depth = match lookup(vars::MAX_OWNER_DEPTH) {
            Some(raw) => {
                let depth: usize = raw.trim().parse().with_context(|| {
                    format!("{} must be a positive integer, got {:?}", vars::MAX_OWNER_DEPTH, raw)
                })?;
                if depth == 0 {
                    bail!("{} must be greater than zero", vars::MAX_OWNER_DEPTH);
                }
                depth
            }
            None => DEFAULT_MAX_OWNER_DEPTH,
        };

        let instance_label =
            lookup(vars::INSTANCE_LABEL).unwrap_or_else(|| labels::INSTANCE.to_string());
        let kube_context = lookup(vars::KUBE_CONTEXT).filter(|c| !c.is_empty());

        Ok(Config {
            namespace,
            max_owner_depth,
            instance_label,
            kube_context,
        })
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            max_depth: self.max_owner_depth,
            instance_label: self.instance_label.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            max_owner_depth: DEFAULT_MAX_OWNER_DEPTH,
            instance_label: labels::INSTANCE.to_string(),
            kube_context: None,
        }
    }
}
