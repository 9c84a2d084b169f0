// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Release membership resolution.

pub mod fallback;
pub mod resolver;

pub use resolver::{OwnershipResolver, ResolverConfig};
