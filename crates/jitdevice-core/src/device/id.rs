//! Device identifiers and device kinds.

use std::fmt;

/// Kind string the registry reports for CPU devices.
pub const DEVICE_CPU: &str = "CPU";

/// Kind string the registry reports for GPU devices.
pub const DEVICE_GPU: &str = "GPU";

/// Dense identifier of a device within one [`DeviceCatalog`].
///
/// Identifiers are assigned in first-seen order starting at 0 and are never
/// reused. They carry no meaning across different catalogs.
///
/// [`DeviceCatalog`]: crate::device::DeviceCatalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceId(u32);

impl DeviceId {
    /// Wraps a raw identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn id(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DeviceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device#{}", self.0)
    }
}

/// Classification of a device, fixed when the device is interned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceKind {
    /// Host CPU
    Cpu,
    /// GPU
    Gpu,
    /// Any device type not specially recognized (TPUs, custom accelerators)
    Other,
}

impl DeviceKind {
    /// Classifies a registry kind string.
    pub fn from_kind_name(kind: &str) -> Self {
        match kind {
            DEVICE_CPU => Self::Cpu,
            DEVICE_GPU => Self::Gpu,
            _ => Self::Other,
        }
    }

    /// Label used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Other => "unknown",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
