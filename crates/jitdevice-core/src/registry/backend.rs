//! Compilation-backend registrations.

use std::fmt;
use std::sync::Arc;

/// Compilation device used for CPU devices.
pub const DEVICE_CPU_XLA_JIT: &str = "XLA_CPU_JIT";

/// Compilation device used for GPU devices.
pub const DEVICE_GPU_XLA_JIT: &str = "XLA_GPU_JIT";

/// When computations placed on a device kind may be auto-clustered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoclusteringPolicy {
    /// Always cluster.
    Always,
    /// Cluster only when the user explicitly asked for JIT compilation.
    IfExplicitlyRequested,
    /// Cluster when JIT compilation is turned on for the whole session.
    IfEnabledGlobally,
}

/// A compilation backend registered for a device kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRegistration {
    /// Name of the device the computation is compiled for.
    pub compilation_device_name: String,
    /// Auto-clustering policy for this kind.
    pub autoclustering_policy: AutoclusteringPolicy,
}

impl BackendRegistration {
    /// Creates a registration.
    pub fn new<S: Into<String>>(
        compilation_device_name: S,
        autoclustering_policy: AutoclusteringPolicy,
    ) -> Self {
        Self {
            compilation_device_name: compilation_device_name.into(),
            autoclustering_policy,
        }
    }
}

impl fmt::Display for BackendRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compilation_device_name)
    }
}

/// Shared handle to a registration, cached per device by the catalog.
pub type BackendHandle = Arc<BackendRegistration>;
