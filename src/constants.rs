// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Well-known Kubernetes labels
pub mod labels {
    /// Release instance label set by Helm charts and most label-driven controllers
    pub const INSTANCE: &str = "app.kubernetes.io/instance";
}

/// Environment variables read by `Config::from_env`
pub mod env {
    pub const NAMESPACE: &str = "RELEASESCOPE_NAMESPACE";
    /// Downward-API namespace, used when NAMESPACE is not set
    pub const POD_NAMESPACE: &str = "POD_NAMESPACE";
    pub const MAX_OWNER_DEPTH: &str = "RELEASESCOPE_MAX_OWNER_DEPTH";
    pub const INSTANCE_LABEL: &str = "RELEASESCOPE_INSTANCE_LABEL";
    pub const KUBE_CONTEXT: &str = "RELEASESCOPE_KUBE_CONTEXT";
}

pub const DEFAULT_NAMESPACE: &str = "default";

/// Owner chains of supported kinds are at most three hops in practice
pub const DEFAULT_MAX_OWNER_DEPTH: usize = 8;
