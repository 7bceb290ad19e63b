//! Device identifiers, device sets and the per-session device catalog.

pub mod catalog;
pub mod id;
pub mod set;

// Re-export key items
pub use catalog::{DeviceCatalog, SharedDeviceCatalog};
pub use id::{DeviceId, DeviceKind, DEVICE_CPU, DEVICE_GPU};
pub use set::DeviceSet;
