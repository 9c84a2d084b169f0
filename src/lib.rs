// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolve which live Kubernetes objects belong to an installed release.

pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod logging;
pub mod ownership;
pub mod scope;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use kubernetes::KindRegistry;
pub use ownership::{OwnershipResolver, ResolverConfig};
pub use scope::{ReleaseScope, ScopedApi};
pub use types::{Gvk, OwnerRef, ReferenceManifest, ResourceIdentity, ResourceKind};
