//! Policy knobs for single-device selection.

/// Configuration of the device-selection policy.
///
/// The default is the strict policy: an unknown-kind device may not be mixed
/// with a CPU device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Allow one unknown-kind device together with one CPU device. The
    /// unknown-kind device is picked in that case.
    pub allow_mixing_unknown_and_cpu: bool,
}

impl SelectionConfig {
    /// Creates a configuration with the given mixing rule.
    pub const fn new(allow_mixing_unknown_and_cpu: bool) -> Self {
        Self {
            allow_mixing_unknown_and_cpu,
        }
    }

    /// Start building a configuration from the defaults.
    pub fn builder() -> SelectionConfigBuilder {
        SelectionConfigBuilder::new()
    }
}

/// Builder for creating a custom selection configuration.
#[derive(Debug, Default)]
pub struct SelectionConfigBuilder {
    config: SelectionConfig,
}

impl SelectionConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: SelectionConfig::default(),
        }
    }

    /// Allow or forbid mixing unknown-kind and CPU devices.
    pub fn allow_mixing_unknown_and_cpu(mut self, allow: bool) -> Self {
        self.config.allow_mixing_unknown_and_cpu = allow;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SelectionConfig {
        self.config
    }
}
