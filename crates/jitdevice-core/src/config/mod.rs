//! Configuration for device selection.

pub mod defaults;
pub mod selection;

// Re-export key items
pub use defaults::default_registry;
pub use selection::{SelectionConfig, SelectionConfigBuilder};
