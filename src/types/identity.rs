// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The slice of object metadata that ownership resolution looks at

use super::kind::Gvk;
use crate::error::Result;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{
    api::{DynamicObject, ObjectMeta},
    Resource,
};
use std::collections::BTreeMap;
use std::fmt;

/// An owner reference as recorded on a dependent object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: Option<String>,
    pub controller: bool,
}

impl OwnerRef {
    pub fn new(api_version: &str, kind: &str, name: &str) -> Self {
        OwnerRef {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
            name: name.to_string(),
            uid: None,
            controller: false,
        }
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn gvk(&self) -> Result<Gvk> {
        Gvk::parse(&self.api_version, &self.kind)
    }
}

impl From<&OwnerReference> for OwnerRef {
    fn from(owner: &OwnerReference) -> Self {
        OwnerRef {
            api_version: owner.api_version.clone(),
            kind: owner.kind.clone(),
            name: owner.name.clone(),
            uid: Some(owner.uid.clone()).filter(|uid| !uid.is_empty()),
            controller: owner.controller.unwrap_or(false),
        }
    }
}

/// Key under which an object is tracked during a single resolution pass
pub type ObjectKey = (Gvk, Option<String>, String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub gvk: Gvk,
    /// None for cluster-scoped objects
    pub namespace: Option<String>,
    pub name: String,
    pub uid: Option<String>,
    pub owner_references: Vec<OwnerRef>,
    pub labels: BTreeMap<String, String>,
}

impl ResourceIdentity {
    pub fn new(gvk: Gvk, namespace: Option<&str>, name: &str) -> Self {
        ResourceIdentity {
            gvk,
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            uid: None,
            owner_references: Vec::new(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn with_owner(mut self, owner: OwnerRef) -> Self {
        self.owner_references.push(owner);
        self
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    pub fn from_meta(gvk: Gvk, meta: &ObjectMeta) -> Self {
        ResourceIdentity {
            gvk,
            namespace: meta.namespace.clone(),
            name: meta.name.clone().unwrap_or_default(),
            uid: meta.uid.clone(),
            owner_references: meta
                .owner_references
                .as_ref()
                .map(|refs| refs.iter().map(OwnerRef::from).collect())
                .unwrap_or_default(),
            labels: meta.labels.clone().unwrap_or_default(),
        }
    }

    pub fn from_resource<K: Resource<DynamicType = ()>>(obj: &K) -> Self {
        Self::from_meta(Gvk::of::<K>(), obj.meta())
    }

    /// Build from a dynamic object. The object's own type metadata wins over
    /// `fallback` when present and well-formed.
    pub fn from_dynamic(fallback: Gvk, obj: &DynamicObject) -> Self {
        let gvk = obj
            .types
            .as_ref()
            .and_then(|t| Gvk::parse(&t.api_version, &t.kind).ok())
            .unwrap_or(fallback);
        Self::from_meta(gvk, &obj.metadata)
    }

    pub fn key(&self) -> ObjectKey {
        (self.gvk.clone(), self.namespace.clone(), self.name.clone())
    }

    /// Same group, version, kind, namespace and name
    pub fn is_same_object(&self, other: &ResourceIdentity) -> bool {
        self.gvk == other.gvk && self.namespace == other.namespace && self.name == other.name
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.gvk, ns, self.name),
            None => write!(f, "{} {}", self.gvk, self.name),
        }
    }
}
