//! Single-device selection policy.
//!
//! Given the candidate devices of one computation, [`DeviceSelector::select`]
//! either picks the device to compile for or reports which rule makes the
//! choice ambiguous. The rules, first match wins:
//!
//! 1. more than one CPU, GPU or unknown-kind device is a conflict;
//! 2. an unknown-kind device next to a GPU is a conflict;
//! 3. an unknown-kind device next to a CPU is a conflict unless
//!    [`SelectionConfig::allow_mixing_unknown_and_cpu`] is set.
//!
//! Otherwise the GPU is picked, else the unknown-kind device, else the CPU.

use super::conflict::Conflict;
use crate::config::SelectionConfig;
use crate::device::{DeviceCatalog, DeviceId, DeviceKind, DeviceSet};
use crate::error::{DeviceError, Result};
use tracing::debug;

/// Outcome of a selection that did not hit a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The device to compile for.
    Picked(DeviceId),
    /// No consistent single device exists.
    Infeasible {
        /// Which rule fired
        conflict: Conflict,
        /// Diagnostic naming the devices involved
        description: String,
    },
}

impl Selection {
    /// The picked device, if any.
    pub fn device(&self) -> Option<DeviceId> {
        match self {
            Self::Picked(device) => Some(*device),
            Self::Infeasible { .. } => None,
        }
    }

    /// Returns `true` if a device was picked.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Picked(_))
    }

    /// Converts infeasibility into [`DeviceError::ConflictingDevices`].
    pub fn into_result(self) -> Result<DeviceId> {
        match self {
            Self::Picked(device) => Ok(device),
            Self::Infeasible {
                conflict,
                description,
            } => Err(DeviceError::conflicting_devices(conflict, description)),
        }
    }
}

/// One representative per kind, plus the kind that showed up twice.
#[derive(Debug, Default)]
struct Buckets {
    cpu: Option<DeviceId>,
    gpu: Option<DeviceId>,
    unknown: Option<DeviceId>,
    multiple: Option<DeviceKind>,
}

impl Buckets {
    fn collect(catalog: &DeviceCatalog, devices: &DeviceSet) -> Result<Self> {
        let mut buckets = Self::default();

        for device in devices {
            let kind = catalog.kind_of(device)?;
            let slot = match kind {
                DeviceKind::Cpu => &mut buckets.cpu,
                DeviceKind::Gpu => &mut buckets.gpu,
                DeviceKind::Other => &mut buckets.unknown,
            };

            // One duplicate dooms the set; no need to classify the rest.
            if slot.is_some() {
                buckets.multiple = Some(kind);
                break;
            }
            *slot = Some(device);
        }

        Ok(buckets)
    }

    /// GPU if present, else the unknown-kind device, else the CPU.
    fn pick(&self) -> Option<DeviceId> {
        self.gpu.or(self.unknown).or(self.cpu)
    }
}

/// Picks a single compilation device according to a [`SelectionConfig`].
///
/// # Example
///
/// ```
/// use jitdevice_core::prelude::*;
///
/// let mut catalog = DeviceCatalog::new();
/// let devices = catalog.intern_all(["/device:CPU:0", "/device:GPU:0"]).unwrap();
///
/// let selector = DeviceSelector::default();
/// let picked = selector.try_pick_device(&catalog, &devices).unwrap();
/// assert_eq!(catalog.name_for(picked).unwrap(), "/device:GPU:0");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceSelector {
    config: SelectionConfig,
}

impl DeviceSelector {
    /// Creates a selector with the given policy.
    pub const fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    /// The policy in use.
    pub const fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Runs the selection policy over `devices`.
    ///
    /// Infeasibility is a regular [`Selection::Infeasible`] value. An empty
    /// set ([`DeviceError::PreconditionViolation`]) or an identifier unknown
    /// to `catalog` ([`DeviceError::InvalidIdentifier`]) is an error.
    pub fn select(&self, catalog: &DeviceCatalog, devices: &DeviceSet) -> Result<Selection> {
        if devices.is_empty() {
            return Err(DeviceError::precondition_violation("No devices to choose from"));
        }

        let buckets = Buckets::collect(catalog, devices)?;

        if let Some((conflict, description)) = self.find_conflict(catalog, devices, &buckets)? {
            debug!(%conflict, %description, "no single device can be picked");
            return Ok(Selection::Infeasible {
                conflict,
                description,
            });
        }

        // A non-empty set fills at least one bucket, so `pick` only comes
        // back empty if the emptiness check above is bypassed.
        let picked = buckets.pick().ok_or_else(|| {
            DeviceError::precondition_violation("device set yielded no classified device")
        })?;

        let name = catalog.name_for(picked)?;
        debug!(device = name, id = picked.id(), "picked compilation device");
        Ok(Selection::Picked(picked))
    }

    fn find_conflict(
        &self,
        catalog: &DeviceCatalog,
        devices: &DeviceSet,
        buckets: &Buckets,
    ) -> Result<Option<(Conflict, String)>> {
        if let Some(kind) = buckets.multiple {
            let conflict = match kind {
                DeviceKind::Cpu => Conflict::MultipleCpu,
                DeviceKind::Gpu => Conflict::MultipleGpu,
                DeviceKind::Other => Conflict::MultipleUnknown,
            };
            let description = format!(
                "Multiple {} devices {}",
                kind,
                catalog.describe_set(devices)
            );
            return Ok(Some((conflict, description)));
        }

        if let (Some(unknown), Some(gpu)) = (buckets.unknown, buckets.gpu) {
            let description = format!(
                "Found both unknown and GPU devices: {}, {}",
                catalog.name_for(unknown)?,
                catalog.name_for(gpu)?
            );
            return Ok(Some((Conflict::UnknownAndGpu, description)));
        }

        if !self.config.allow_mixing_unknown_and_cpu {
            if let (Some(unknown), Some(cpu)) = (buckets.unknown, buckets.cpu) {
                let description = format!(
                    "Found both unknown and CPU devices: {}, {}",
                    catalog.name_for(unknown)?,
                    catalog.name_for(cpu)?
                );
                return Ok(Some((Conflict::UnknownAndCpu, description)));
            }
        }

        Ok(None)
    }

    /// Picks the device, failing with [`DeviceError::ConflictingDevices`]
    /// when none can be picked.
    pub fn try_pick_device(&self, catalog: &DeviceCatalog, devices: &DeviceSet) -> Result<DeviceId> {
        self.select(catalog, devices)?.into_result()
    }

    /// Returns whether a device can be picked. Only infeasibility maps to
    /// `false`; every other failure is returned as an error.
    pub fn can_pick_device(&self, catalog: &DeviceCatalog, devices: &DeviceSet) -> Result<bool> {
        Ok(self.select(catalog, devices)?.is_feasible())
    }
}

/// Picks the single device to compile `devices` for.
pub fn try_pick_device(
    catalog: &DeviceCatalog,
    devices: &DeviceSet,
    allow_mixing_unknown_and_cpu: bool,
) -> Result<DeviceId> {
    DeviceSelector::new(SelectionConfig::new(allow_mixing_unknown_and_cpu))
        .try_pick_device(catalog, devices)
}

/// Returns whether a single device can be picked for `devices`.
pub fn can_pick_device(
    catalog: &DeviceCatalog,
    devices: &DeviceSet,
    allow_mixing_unknown_and_cpu: bool,
) -> Result<bool> {
    DeviceSelector::new(SelectionConfig::new(allow_mixing_unknown_and_cpu))
        .can_pick_device(catalog, devices)
}
