//! Device-name resolution and compilation-backend lookup.
//!
//! The catalog consumes a [`DeviceRegistry`] to turn a fully-qualified device
//! name into a kind string and to find the compilation backend registered for
//! that kind. [`StandardRegistry`] is the implementation used by default.

pub mod backend;
pub mod name;
pub mod standard;

use crate::error::Result;
use std::fmt::Debug;

// Re-export key items
pub use backend::{
    AutoclusteringPolicy, BackendHandle, BackendRegistration, DEVICE_CPU_XLA_JIT,
    DEVICE_GPU_XLA_JIT,
};
pub use name::DeviceName;
pub use standard::StandardRegistry;

/// Source of device kinds and compilation backends.
pub trait DeviceRegistry: Debug + Send + Sync {
    /// Resolves the kind string (e.g. `"CPU"`, `"GPU"`, `"TPU"`) of a
    /// fully-qualified device name.
    ///
    /// Fails with [`DeviceError::MalformedDeviceName`] on unparsable input.
    ///
    /// [`DeviceError::MalformedDeviceName`]: crate::error::DeviceError::MalformedDeviceName
    fn resolve_kind(&self, name: &str) -> Result<String>;

    /// Compilation backend registered for `kind`, if any.
    fn compilation_backend(&self, kind: &str) -> Option<BackendHandle>;
}
