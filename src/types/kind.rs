// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kind descriptors

use crate::error::{Error, Result};
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::{discovery::ApiResource, Resource};
use std::fmt;

/// Group, version and kind of an object. The core group is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gvk {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl Gvk {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Gvk {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    /// Split an `apiVersion` string (`v1`, `apps/v1`) and pair it with a kind
    pub fn parse(api_version: &str, kind: &str) -> Result<Self> {
        let (group, version) = match api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };

        let empty_group = api_version.contains('/') && group.is_empty();
        if version.is_empty() || version.contains('/') || empty_group {
            return Err(Error::InvalidApiVersion(api_version.to_string()));
        }

        Ok(Gvk::new(group, version, kind))
    }

    /// Gvk of a compiled-in resource type
    pub fn of<K: Resource<DynamicType = ()>>() -> Self {
        Gvk::new(&K::group(&()), &K::version(&()), &K::kind(&()))
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn matches(&self, api_version: &str, kind: &str) -> bool {
        self.kind == kind && self.api_version() == api_version
    }
}

impl fmt::Display for Gvk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version(), self.kind)
    }
}

/// A registered resource type: its Gvk, REST plural and scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKind {
    pub gvk: Gvk,
    pub plural: String,
    pub namespaced: bool,
}

impl ResourceKind {
    pub fn namespaced<K>() -> Self
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>,
    {
        Self::typed::<K>(true)
    }

    pub fn cluster<K>() -> Self
    where
        K: Resource<DynamicType = (), Scope = ClusterResourceScope>,
    {
        Self::typed::<K>(false)
    }

    /// A kind that is not compiled into k8s-openapi, typically an API version
    /// that current clusters no longer serve.
    pub fn legacy(group: &str, version: &str, kind: &str, plural: &str, namespaced: bool) -> Self {
        ResourceKind {
            gvk: Gvk::new(group, version, kind),
            plural: plural.to_string(),
            namespaced,
        }
    }

    fn typed<K: Resource<DynamicType = ()>>(namespaced: bool) -> Self {
        ResourceKind {
            gvk: Gvk::of::<K>(),
            plural: K::plural(&()).into_owned(),
            namespaced,
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.gvk.group.clone(),
            version: self.gvk.version.clone(),
            api_version: self.gvk.api_version(),
            kind: self.gvk.kind.clone(),
            plural: self.plural.clone(),
        }
    }
}
