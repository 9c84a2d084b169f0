// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Table of kinds whose owners can be fetched live

use super::lookup::{DynamicReader, KindReader};
use crate::types::{Gvk, ResourceKind};
use k8s_openapi::api::admissionregistration::v1::{
    MutatingWebhookConfiguration, ValidatingWebhookConfiguration,
};
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    ConfigMap, Endpoints, Namespace, Node, PersistentVolume, PersistentVolumeClaim, Pod,
    PodTemplate, Secret, Service, ServiceAccount,
};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::api::policy::v1::PodDisruptionBudget;
use k8s_openapi::api::rbac::v1::{ClusterRole, ClusterRoleBinding, Role, RoleBinding};
use k8s_openapi::api::storage::v1::StorageClass;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Maps a Gvk to the reader that fetches it. Built once, then shared read-only.
#[derive(Clone, Default)]
pub struct KindRegistry {
    readers: HashMap<Gvk, Arc<dyn KindReader>>,
}

impl KindRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in workload, networking, RBAC, storage
    /// and core kinds
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in builtin_kinds() {
            registry.register(kind);
        }
        registry
    }

    pub fn register(&mut self, kind: ResourceKind) -> &mut Self {
        self.register_reader(Arc::new(DynamicReader::new(kind)))
    }

    /// Register a custom reader, replacing any reader for the same Gvk
    pub fn register_reader(&mut self, reader: Arc<dyn KindReader>) -> &mut Self {
        self.readers.insert(reader.kind().gvk.clone(), reader);
        self
    }

    pub fn get(&self, gvk: &Gvk) -> Option<&Arc<dyn KindReader>> {
        self.readers.get(gvk)
    }

    /// Unknown kinds are assumed to be namespaced
    pub fn is_namespaced(&self, gvk: &Gvk) -> bool {
        self.readers
            .get(gvk)
            .map(|reader| reader.kind().namespaced)
            .unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&Gvk> = self.readers.keys().collect();
        kinds.sort();
        f.debug_struct("KindRegistry").field("kinds", &kinds).finish()
    }
}

fn builtin_kinds() -> Vec<ResourceKind> {
    vec![
        // admissionregistration.k8s.io
        ResourceKind::cluster::<MutatingWebhookConfiguration>(),
        ResourceKind::cluster::<ValidatingWebhookConfiguration>(),
        // apiextensions.k8s.io
        ResourceKind::cluster::<CustomResourceDefinition>(),
        ResourceKind::legacy(
            "apiextensions.k8s.io",
            "v1beta1",
            "CustomResourceDefinition",
            "customresourcedefinitions",
            false,
        ),
        // apps
        ResourceKind::namespaced::<DaemonSet>(),
        ResourceKind::namespaced::<Deployment>(),
        ResourceKind::namespaced::<ReplicaSet>(),
        ResourceKind::namespaced::<StatefulSet>(),
        ResourceKind::legacy("apps", "v1beta1", "Deployment", "deployments", true),
        ResourceKind::legacy("apps", "v1beta1", "StatefulSet", "statefulsets", true),
        // batch
        ResourceKind::namespaced::<Job>(),
        ResourceKind::namespaced::<CronJob>(),
        ResourceKind::legacy("batch", "v1beta1", "CronJob", "cronjobs", true),
        ResourceKind::legacy("batch", "v2alpha1", "CronJob", "cronjobs", true),
        // networking
        ResourceKind::namespaced::<Ingress>(),
        ResourceKind::legacy("networking.k8s.io", "v1beta1", "Ingress", "ingresses", true),
        ResourceKind::legacy("extensions", "v1beta1", "Ingress", "ingresses", true),
        // policy
        ResourceKind::namespaced::<PodDisruptionBudget>(),
        ResourceKind::legacy(
            "policy",
            "v1beta1",
            "PodDisruptionBudget",
            "poddisruptionbudgets",
            true,
        ),
        ResourceKind::legacy(
            "policy",
            "v1beta1",
            "PodSecurityPolicy",
            "podsecuritypolicies",
            false,
        ),
        // rbac.authorization.k8s.io
        ResourceKind::cluster::<ClusterRole>(),
        ResourceKind::cluster::<ClusterRoleBinding>(),
        ResourceKind::namespaced::<Role>(),
        ResourceKind::namespaced::<RoleBinding>(),
        // storage.k8s.io
        ResourceKind::cluster::<StorageClass>(),
        // core
        ResourceKind::namespaced::<ConfigMap>(),
        ResourceKind::namespaced::<Endpoints>(),
        ResourceKind::cluster::<Namespace>(),
        ResourceKind::cluster::<Node>(),
        ResourceKind::cluster::<PersistentVolume>(),
        ResourceKind::namespaced::<PersistentVolumeClaim>(),
        ResourceKind::namespaced::<Pod>(),
        ResourceKind::namespaced::<PodTemplate>(),
        ResourceKind::namespaced::<Secret>(),
        ResourceKind::namespaced::<Service>(),
        ResourceKind::namespaced::<ServiceAccount>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_every_kind_once() {
        let registry = KindRegistry::builtin();
        assert_eq!(registry.len(), builtin_kinds().len());
    }

    #[test]
    fn test_builtin_resolves_modern_and_legacy_versions() {
        let registry = KindRegistry::builtin();

        assert!(registry.get(&Gvk::new("apps", "v1", "ReplicaSet")).is_some());
        assert!(registry.get(&Gvk::new("apps", "v1beta1", "StatefulSet")).is_some());
        assert!(registry.get(&Gvk::new("", "v1", "Service")).is_some());
        assert!(registry.get(&Gvk::new("example.com", "v1", "Widget")).is_none());
    }

    #[test]
    fn test_scope_lookup() {
        let registry = KindRegistry::builtin();

        let cluster_role = Gvk::new("rbac.authorization.k8s.io", "v1", "ClusterRole");
        assert!(!registry.is_namespaced(&cluster_role));
        assert!(!registry.is_namespaced(&Gvk::new("", "v1", "Namespace")));
        assert!(registry.is_namespaced(&Gvk::new("", "v1", "ConfigMap")));
        assert!(registry.is_namespaced(&Gvk::new("example.com", "v1", "Widget")));
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = KindRegistry::new();
        assert!(registry.is_empty());

        registry.register(ResourceKind::legacy("example.com", "v1", "Widget", "widgets", false));

        assert_eq!(registry.len(), 1);
        assert!(!registry.is_namespaced(&Gvk::new("example.com", "v1", "Widget")));
    }
}
