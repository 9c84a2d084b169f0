// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decides whether a live object belongs to a release manifest

use super::fallback::candidate_parents;
use crate::constants::{labels, DEFAULT_MAX_OWNER_DEPTH};
use crate::error::{Error, Result};
use crate::kubernetes::{KindReader, KindRegistry};
use crate::types::{ObjectKey, OwnerRef, ReferenceManifest, ResourceIdentity};
use futures::future::{BoxFuture, FutureExt};
use kube::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Owner hops followed before resolution fails
    pub max_depth: usize,
    /// Label naming the parent in the fallback heuristic
    pub instance_label: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            max_depth: DEFAULT_MAX_OWNER_DEPTH,
            instance_label: labels::INSTANCE.to_string(),
        }
    }
}

/// Resolves release membership through the manifest, owner references and the
/// instance label, in that order.
#[derive(Clone)]
pub struct OwnershipResolver {
    client: Client,
    registry: Arc<KindRegistry>,
    config: ResolverConfig,
}

/// Nodes already evaluated during one `belongs` call
#[derive(Default)]
struct Walk {
    visited: HashSet<ObjectKey>,
}

impl Walk {
    fn visit(&mut self, target: &ResourceIdentity) -> bool {
        self.visited.insert(target.key())
    }

    fn seen(&self, key: &ObjectKey) -> bool {
        self.visited.contains(key)
    }
}

impl OwnershipResolver {
    pub fn new(client: Client, registry: Arc<KindRegistry>, config: ResolverConfig) -> Self {
        Self {
            client,
            registry,
            config,
        }
    }

    /// Resolver over the built-in kinds with default settings
    pub fn with_builtin_kinds(client: Client) -> Self {
        Self::new(client, Arc::new(KindRegistry::builtin()), ResolverConfig::default())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// True when `target` is in `manifest` or is owned, at any depth, by an entry of it.
    ///
    /// Owners that no longer exist end their path silently. Any other API error
    /// aborts the whole resolution.
    #[instrument(skip(self, target, manifest), fields(object = %target))]
    pub async fn belongs(
        &self,
        target: &ResourceIdentity,
        manifest: &ReferenceManifest,
    ) -> Result<bool> {
        let mut walk = Walk::default();
        let found = self.resolve(target, manifest, &mut walk, 0).await?;
        debug!(found, "Resolution finished after visiting {} objects", walk.visited.len());
        Ok(found)
    }

    fn resolve<'a>(
        &'a self,
        target: &'a ResourceIdentity,
        manifest: &'a ReferenceManifest,
        walk: &'a mut Walk,
        depth: usize,
    ) -> BoxFuture<'a, Result<bool>> {
        async move {
            if depth > self.config.max_depth {
                warn!("Giving up on {} after {} owner hops", target, self.config.max_depth);
                return Err(Error::OwnerDepthExceeded {
                    depth: self.config.max_depth,
                    object: target.to_string(),
                });
            }
            if !walk.visit(target) {
                debug!("{} already visited", target);
                return Ok(false);
            }

            if manifest.find_object(target).is_some() {
                debug!("{} is part of the manifest", target);
                return Ok(true);
            }

            let namespace = target.namespace.as_deref();
            if let Some(owner) = target
                .owner_references
                .iter()
                .find(|owner| manifest.find_owner(owner, namespace).is_some())
            {
                debug!("{} is owned by manifest entry {} {}", target, owner.kind, owner.name);
                return Ok(true);
            }

            for owner in &target.owner_references {
                if self.resolve_owner(owner, namespace, manifest, walk, depth).await? {
                    return Ok(true);
                }
            }

            self.resolve_by_label(target, manifest, walk, depth).await
        }
        .boxed()
    }

    async fn resolve_owner(
        &self,
        owner: &OwnerRef,
        namespace: Option<&str>,
        manifest: &ReferenceManifest,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<bool> {
        let gvk = match owner.gvk() {
            Ok(gvk) => gvk,
            Err(e) => {
                warn!("Skipping owner {} {}: {}", owner.kind, owner.name, e);
                return Ok(false);
            }
        };
        if owner.name.is_empty() {
            debug!("Skipping {} owner reference without a name", gvk);
            return Ok(false);
        }
        let Some(reader) = self.registry.get(&gvk) else {
            debug!("No reader registered for owner kind {}, skipping {}", gvk, owner.name);
            return Ok(false);
        };

        match self.fetch(reader.as_ref(), namespace, &owner.name, walk).await? {
            Some(parent) => self.resolve(&parent, manifest, walk, depth + 1).await,
            None => Ok(false),
        }
    }

    async fn resolve_by_label(
        &self,
        target: &ResourceIdentity,
        manifest: &ReferenceManifest,
        walk: &mut Walk,
        depth: usize,
    ) -> Result<bool> {
        let candidates = candidate_parents(&target.gvk);
        if candidates.is_empty() {
            return Ok(false);
        }
        let Some(instance) = target.label(&self.config.instance_label) else {
            return Ok(false);
        };
        if instance.is_empty() {
            debug!("{} has an empty {} label", target, self.config.instance_label);
            return Ok(false);
        }

        for gvk in candidates {
            let Some(reader) = self.registry.get(&gvk) else {
                continue;
            };
            let namespace = target.namespace.as_deref();
            let Some(parent) = self.fetch(reader.as_ref(), namespace, instance, walk).await? else {
                continue;
            };

            debug!("{} matched {} through label {}", target, parent, self.config.instance_label);
            if self.resolve(&parent, manifest, walk, depth + 1).await? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Live lookup of a parent, skipped when the walk already went through it
    async fn fetch(
        &self,
        reader: &dyn KindReader,
        namespace: Option<&str>,
        name: &str,
        walk: &Walk,
    ) -> Result<Option<ResourceIdentity>> {
        let kind = reader.kind();
        let namespace = if kind.namespaced { namespace } else { None };

        let key = (kind.gvk.clone(), namespace.map(str::to_string), name.to_string());
        if walk.seen(&key) {
            debug!("{} {} already visited, not fetching it again", kind.gvk, name);
            return Ok(None);
        }

        let parent = reader.get_by_name(&self.client, namespace, name).await?;
        if parent.is_none() {
            debug!("{} {} no longer exists", kind.gvk, name);
        }
        Ok(parent)
    }
}
