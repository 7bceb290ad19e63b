//! Process-wide defaults.
//!
//! Only immutable data lives here. Device catalogs are never global: they are
//! created per compilation session and passed around explicitly.

use crate::registry::StandardRegistry;
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Standard registry shared by every catalog created with `DeviceCatalog::new`.
pub static DEFAULT_REGISTRY: Lazy<Arc<StandardRegistry>> =
    Lazy::new(|| Arc::new(StandardRegistry::new()));

/// Get the process-wide standard registry.
pub fn default_registry() -> &'static Arc<StandardRegistry> {
    &DEFAULT_REGISTRY
}
