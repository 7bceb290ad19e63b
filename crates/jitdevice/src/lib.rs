//! Pick a single compilation device for a set of candidate devices.
//!
//! This crate re-exports [`jitdevice_core`].
//!
//! # Example
//!
//! ```
//! use jitdevice::prelude::*;
//!
//! let mut catalog = DeviceCatalog::new();
//! let cpu = catalog.get_or_create_id("/device:CPU:0").unwrap();
//! let gpu = catalog.get_or_create_id("/device:GPU:0").unwrap();
//!
//! let devices: DeviceSet = [cpu, gpu].into_iter().collect();
//! assert_eq!(try_pick_device(&catalog, &devices, false).unwrap(), gpu);
//! assert_eq!(catalog.describe_set(&devices), "[/device:CPU:0,/device:GPU:0]");
//! ```

pub use jitdevice_core::*;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use jitdevice_core::prelude::*;
}
