//! Choosing one compilation device for a set of candidates.

pub mod conflict;
pub mod selector;

// Re-export key items
pub use conflict::Conflict;
pub use selector::{can_pick_device, try_pick_device, DeviceSelector, Selection};
