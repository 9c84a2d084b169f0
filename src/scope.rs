// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Readers that only see objects belonging to a release (or to one parent object)

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kubernetes::KindRegistry;
use crate::ownership::OwnershipResolver;
use crate::types::{ReferenceManifest, ResourceIdentity};
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::{
    api::{DeleteParams, ListParams},
    Api, Client, Resource, ResourceExt,
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A manifest plus the namespace it was installed into
#[derive(Clone)]
pub struct ReleaseScope {
    resolver: OwnershipResolver,
    manifest: Arc<ReferenceManifest>,
    namespace: String,
    /// Parents every object must also belong to, on top of the release
    parents: Vec<Arc<ReferenceManifest>>,
}

impl ReleaseScope {
    pub fn new(
        resolver: OwnershipResolver,
        manifest: Arc<ReferenceManifest>,
        namespace: &str,
    ) -> Self {
        Self {
            resolver,
            manifest,
            namespace: namespace.to_string(),
            parents: Vec::new(),
        }
    }

    /// Scope for a rendered release manifest, using the built-in kinds
    pub fn from_manifest_yaml(
        client: Client,
        config: &Config,
        manifest_yaml: &str,
    ) -> Result<Self> {
        let registry = Arc::new(KindRegistry::builtin());
        let manifest = ReferenceManifest::from_yaml(manifest_yaml, &config.namespace, &registry)?;
        let resolver = OwnershipResolver::new(client, registry, config.resolver_config());

        Ok(Self::new(resolver, Arc::new(manifest), &config.namespace))
    }

    pub fn manifest(&self) -> &ReferenceManifest {
        &self.manifest
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn resolver(&self) -> &OwnershipResolver {
        &self.resolver
    }

    /// True when `target` belongs to the release and to every parent the scope was narrowed to
    pub async fn contains(&self, target: &ResourceIdentity) -> Result<bool> {
        if !self.resolver.belongs(target, &self.manifest).await? {
            return Ok(false);
        }
        for parent in &self.parents {
            if !self.resolver.belongs(target, parent).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Narrow the scope to objects owned, directly or transitively, by `parent`.
    ///
    /// The release constraint is kept, so a parent outside the release yields
    /// an empty scope.
    pub fn owned_by(&self, parent: &ResourceIdentity) -> ReleaseScope {
        let mut scope = self.clone();
        scope
            .parents
            .push(Arc::new(ReferenceManifest::single(parent.clone())));
        scope
    }

    /// Reader for a namespaced kind in the scope namespace
    pub fn api<K>(&self) -> ScopedApi<K>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + Debug,
    {
        let api = Api::namespaced(self.resolver.client().clone(), &self.namespace);
        ScopedApi::new(api, Some(&self.namespace), self.clone())
    }

    /// Reader for a cluster-scoped kind
    pub fn cluster_api<K>(&self) -> ScopedApi<K>
    where
        K: Resource<DynamicType = (), Scope = ClusterResourceScope>
            + Clone
            + DeserializeOwned
            + Debug,
    {
        let api = Api::all(self.resolver.client().clone());
        ScopedApi::new(api, None, self.clone())
    }
}

/// An `Api<K>` whose reads are filtered through a `ReleaseScope`
pub struct ScopedApi<K> {
    api: Api<K>,
    /// Namespace `api` reads from, `None` for cluster-wide readers
    namespace: Option<String>,
    scope: ReleaseScope,
}

impl<K> ScopedApi<K>
where
    K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
{
    pub fn new(api: Api<K>, namespace: Option<&str>, scope: ReleaseScope) -> Self {
        Self {
            api,
            namespace: namespace.map(str::to_string),
            scope,
        }
    }

    /// Same reader, limited to dependents of `parent` within the release
    pub fn owned_by(&self, parent: &ResourceIdentity) -> ScopedApi<K> {
        ScopedApi {
            api: self.api.clone(),
            namespace: self.namespace.clone(),
            scope: self.scope.owned_by(parent),
        }
    }

    /// All objects of this kind in scope
    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn list(&self) -> Result<Vec<K>> {
        let objects = self.api.list(&ListParams::default()).await?;
        let total = objects.items.len();

        let mut scoped = Vec::new();
        for obj in objects.items {
            if self.scope.contains(&ResourceIdentity::from_resource(&obj)).await? {
                scoped.push(obj);
            }
        }

        debug!("{} of {} objects in scope", scoped.len(), total);
        Ok(scoped)
    }

    /// The named object, or `Error::NotFound` if it is absent or out of scope
    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn get(&self, name: &str) -> Result<K> {
        let obj = match self.api.get(name).await {
            Ok(obj) => obj,
            Err(kube::Error::Api(err)) if err.code == 404 => return Err(self.not_found(name)),
            Err(e) => return Err(e.into()),
        };

        if self.scope.contains(&ResourceIdentity::from_resource(&obj)).await? {
            Ok(obj)
        } else {
            debug!("{} exists but is not in scope", name);
            Err(self.not_found(name))
        }
    }

    /// Delete the named object if it is in scope
    #[instrument(skip(self), fields(kind = %K::kind(&())))]
    pub async fn delete(&self, name: &str) -> Result<()> {
        let obj = self.get(name).await?;
        self.api.delete(&obj.name_any(), &DeleteParams::default()).await?;
        info!("Deleted {} {}", K::kind(&()), name);
        Ok(())
    }

    fn not_found(&self, name: &str) -> Error {
        Error::NotFound {
            kind: K::kind(&()).into_owned(),
            namespace: self.namespace.clone(),
            name: name.to_string(),
        }
    }
}
