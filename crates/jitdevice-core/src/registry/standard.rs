//! Default registry: name parsing plus a table of compilation backends.

use super::backend::{
    AutoclusteringPolicy, BackendHandle, BackendRegistration, DEVICE_CPU_XLA_JIT,
    DEVICE_GPU_XLA_JIT,
};
use super::name::DeviceName;
use super::DeviceRegistry;
use crate::device::{DEVICE_CPU, DEVICE_GPU};
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry resolving kinds with [`DeviceName`] and backends from a table.
///
/// # Example
///
/// ```
/// use jitdevice_core::registry::{
///     AutoclusteringPolicy, BackendRegistration, DeviceRegistry, StandardRegistry,
/// };
///
/// let registry = StandardRegistry::new().with_backend(
///     "TPU",
///     BackendRegistration::new("XLA_TPU_JIT", AutoclusteringPolicy::Always),
/// );
///
/// assert_eq!(registry.resolve_kind("/device:TPU:0").unwrap(), "TPU");
/// assert!(registry.compilation_backend("TPU").is_some());
/// assert!(registry.compilation_backend("FPGA").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct StandardRegistry {
    backends: HashMap<String, BackendHandle>,
}

impl StandardRegistry {
    /// Creates a registry with the CPU and GPU JIT backends registered.
    pub fn new() -> Self {
        Self::empty()
            .with_backend(
                DEVICE_CPU,
                BackendRegistration::new(
                    DEVICE_CPU_XLA_JIT,
                    AutoclusteringPolicy::IfExplicitlyRequested,
                ),
            )
            .with_backend(
                DEVICE_GPU,
                BackendRegistration::new(
                    DEVICE_GPU_XLA_JIT,
                    AutoclusteringPolicy::IfEnabledGlobally,
                ),
            )
    }

    /// Creates a registry without any compilation backend.
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Registers a backend for `kind`, returning the one it replaces.
    pub fn register<S: Into<String>>(
        &mut self,
        kind: S,
        registration: BackendRegistration,
    ) -> Option<BackendHandle> {
        self.backends.insert(kind.into(), Arc::new(registration))
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_backend<S: Into<String>>(
        mut self,
        kind: S,
        registration: BackendRegistration,
    ) -> Self {
        self.register(kind, registration);
        self
    }

    /// Returns `true` if a backend is registered for `kind`.
    pub fn has_backend(&self, kind: &str) -> bool {
        self.backends.contains_key(kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for StandardRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry for StandardRegistry {
    // A name without a device component resolves to the empty kind, which
    // classifies as an unknown device.
    fn resolve_kind(&self, name: &str) -> Result<String> {
        Ok(DeviceName::parse(name)?.device_type.unwrap_or_default())
    }

    fn compilation_backend(&self, kind: &str) -> Option<BackendHandle> {
        self.backends.get(kind).cloned()
    }
}
