// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kinds, object identities and release manifests.

pub mod identity;
pub mod kind;
pub mod manifest;

pub use identity::{ObjectKey, OwnerRef, ResourceIdentity};
pub use kind::{Gvk, ResourceKind};
pub use manifest::ReferenceManifest;
