// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(String),

    #[error("Invalid manifest: {0}")]
    Manifest(String),

    #[error("Failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid apiVersion: {0:?}")]
    InvalidApiVersion(String),

    #[error("{} {} not found", .kind, display_name(.namespace, .name))]
    NotFound {
        kind: String,
        namespace: Option<String>,
        name: String,
    },

    #[error("Owner chain of {object} exceeds the maximum depth of {depth}")]
    OwnerDepthExceeded { depth: usize, object: String },
}

impl Error {
    /// True for scoped-reader misses and for API 404 responses
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound { .. } => true,
            Error::Kube(kube::Error::Api(err)) => err.code == 404,
            _ => false,
        }
    }
}

fn display_name(namespace: &Option<String>, name: &str) -> String {
    match namespace {
        Some(ns) => format!("{}/{}", ns, name),
        None => name.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
