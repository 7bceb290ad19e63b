//! Device interning and single-device selection for JIT compilation.
//!
//! A graph-partitioning stage collects the devices a computation has been
//! annotated with and asks whether the whole computation can be compiled for
//! one of them. This crate answers that question without ever silently
//! picking a device for an ambiguous, multi-device candidate set.
//!
//! # Key Concepts
//!
//! - **Device catalog**: interns device names into dense identifiers and
//!   caches each device's kind and compilation backend
//! - **Device set**: a compact bitset of identifiers from one catalog
//! - **Selection policy**: picks a GPU, else an unknown-kind device, else a
//!   CPU, and refuses any set where that choice would be ambiguous
//!
//! # Modules
//!
//! - [`config`]: Selection policy configuration and process-wide defaults
//! - [`device`]: Device identifiers, device sets and the device catalog
//! - [`error`]: Error types
//! - [`registry`]: Device-name parsing and compilation-backend lookup
//! - [`selection`]: The single-device selection policy

pub mod config;
pub mod device;
pub mod error;
pub mod registry;
pub mod selection;

// Re-export commonly used items at the crate root
pub use error::{DeviceError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use jitdevice_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SelectionConfig, SelectionConfigBuilder};
    pub use crate::device::{DeviceCatalog, DeviceId, DeviceKind, DeviceSet, SharedDeviceCatalog};
    pub use crate::error::{DeviceError, Result};
    pub use crate::registry::{
        AutoclusteringPolicy, BackendHandle, BackendRegistration, DeviceName, DeviceRegistry,
        StandardRegistry,
    };
    pub use crate::selection::{
        can_pick_device, try_pick_device, Conflict, DeviceSelector, Selection,
    };
}
