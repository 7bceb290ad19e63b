//! Reasons a candidate set admits no single device.

use std::fmt;

/// Rule that made a selection infeasible, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conflict {
    /// More than one CPU device.
    MultipleCpu,
    /// More than one GPU device.
    MultipleGpu,
    /// More than one unknown-kind device.
    MultipleUnknown,
    /// An unknown-kind device together with a GPU device. Never allowed.
    UnknownAndGpu,
    /// An unknown-kind device together with a CPU device, when mixing is
    /// not allowed.
    UnknownAndCpu,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MultipleCpu => "multiple CPU devices",
            Self::MultipleGpu => "multiple GPU devices",
            Self::MultipleUnknown => "multiple unknown devices",
            Self::UnknownAndGpu => "both unknown and GPU devices",
            Self::UnknownAndCpu => "both unknown and CPU devices",
        })
    }
}
