// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The set of objects a release produced

use super::identity::{OwnerRef, ResourceIdentity};
use super::kind::Gvk;
use crate::error::{Error, Result};
use crate::kubernetes::KindRegistry;
use kube::{api::ObjectMeta, Resource};
use serde::Deserialize;
use tracing::debug;

/// Ordered, read-only list of the objects belonging to a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceManifest {
    entries: Vec<ResourceIdentity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestDocument {
    api_version: Option<String>,
    kind: Option<String>,
    #[serde(default)]
    metadata: ObjectMeta,
    items: Option<Vec<serde_yaml::Value>>,
}

impl ReferenceManifest {
    pub fn from_identities<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ResourceIdentity>,
    {
        ReferenceManifest {
            entries: entries.into_iter().collect(),
        }
    }

    /// A manifest holding one parent object, used to scope reads to its dependents
    pub fn single(parent: ResourceIdentity) -> Self {
        ReferenceManifest {
            entries: vec![parent],
        }
    }

    pub fn from_resources<K: Resource<DynamicType = ()>>(objects: &[K]) -> Self {
        Self::from_identities(objects.iter().map(ResourceIdentity::from_resource))
    }

    /// Parse the multi-document YAML a release manager renders.
    ///
    /// Namespaced objects without `metadata.namespace` are placed in
    /// `default_namespace`; the registry decides which kinds are namespaced.
    pub fn from_yaml(
        yaml: &str,
        default_namespace: &str,
        registry: &KindRegistry,
    ) -> Result<Self> {
        let mut manifest = ReferenceManifest::default();

        for document in serde_yaml::Deserializer::from_str(yaml) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            manifest.push_document(value, default_namespace, registry)?;
        }

        debug!("Parsed manifest with {} objects", manifest.len());
        Ok(manifest)
    }

    fn push_document(
        &mut self,
        value: serde_yaml::Value,
        default_namespace: &str,
        registry: &KindRegistry,
    ) -> Result<()> {
        let document: ManifestDocument = serde_yaml::from_value(value)?;

        let Some(api_version) = document.api_version else {
            return Err(Error::Manifest("document is missing apiVersion".to_string()));
        };
        let Some(kind) = document.kind else {
            return Err(Error::Manifest(format!(
                "document with apiVersion {} is missing kind",
                api_version
            )));
        };

        // A kind named `*List` is only a list when it carries `items`
        if kind.ends_with("List") {
            if let Some(items) = document.items {
                for item in items {
                    self.push_document(item, default_namespace, registry)?;
                }
                return Ok(());
            }
        }

        let gvk = Gvk::parse(&api_version, &kind)?;
        if document.metadata.name.as_deref().unwrap_or_default().is_empty() {
            return Err(Error::Manifest(format!("{} is missing metadata.name", gvk)));
        }

        let mut identity = ResourceIdentity::from_meta(gvk, &document.metadata);
        if registry.is_namespaced(&identity.gvk) {
            if identity.namespace.is_none() {
                identity.namespace = Some(default_namespace.to_string());
            }
        } else {
            identity.namespace = None;
        }

        self.entries.push(identity);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceIdentity> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry that is the same object as `target`, if any
    pub fn find_object(&self, target: &ResourceIdentity) -> Option<&ResourceIdentity> {
        self.entries.iter().find(|entry| entry.is_same_object(target))
    }

    /// First entry an owner reference on a dependent in `namespace` points at.
    ///
    /// Owners live in the dependent's namespace or are cluster-scoped, so
    /// namespaced entries elsewhere never match. When both sides carry a uid
    /// they must agree.
    pub fn find_owner(
        &self,
        owner: &OwnerRef,
        namespace: Option<&str>,
    ) -> Option<&ResourceIdentity> {
        self.entries.iter().find(|entry| {
            entry.gvk.matches(&owner.api_version, &owner.kind)
                && entry.name == owner.name
                && (entry.namespace.is_none() || entry.namespace.as_deref() == namespace)
                && match (&entry.uid, &owner.uid) {
                    (Some(a), Some(b)) => a == b,
                    _ => true,
                }
        })
    }
}

impl<'a> IntoIterator for &'a ReferenceManifest {
    type Item = &'a ResourceIdentity;
    type IntoIter = std::slice::Iter<'a, ResourceIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
