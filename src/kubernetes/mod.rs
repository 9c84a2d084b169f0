// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access: client creation, per-kind readers and the kind registry.

pub mod client;
pub mod lookup;
pub mod registry;

pub use client::{client_from_kubeconfig, create_client};
pub use lookup::{DynamicReader, KindReader};
pub use registry::KindRegistry;
