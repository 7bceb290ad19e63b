//! Error types for device interning and device selection.
//!
//! This module defines the single error type used throughout the crate.
//! Infeasible selections are reported through [`DeviceError::ConflictingDevices`];
//! every other variant signals a caller or programming error.

use crate::selection::Conflict;
use thiserror::Error;

/// Errors that can occur while interning devices or selecting one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    /// An argument was rejected before any work was done.
    ///
    /// This error occurs when an empty device name is interned.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the rejected argument
        reason: String,
    },

    /// A device name could not be parsed.
    ///
    /// Propagated unchanged from the registry's name resolution.
    #[error("Malformed assigned device '{name}': {reason}")]
    MalformedDeviceName {
        /// The offending device name
        name: String,
        /// Why parsing failed
        reason: String,
    },

    /// A device identifier does not belong to the catalog it was used with.
    #[error("Invalid device identifier {id}: catalog holds {len} devices")]
    InvalidIdentifier {
        /// The out-of-range identifier
        id: u32,
        /// Number of devices in the catalog
        len: usize,
    },

    /// A precondition of the called operation does not hold.
    #[error("Precondition violated: {reason}")]
    PreconditionViolation {
        /// Description of the violated precondition
        reason: String,
    },

    /// No single device can be picked for the candidate set.
    ///
    /// This is the only "infeasible" outcome; `can_pick_device` turns it
    /// into `false`.
    #[error("{description}")]
    ConflictingDevices {
        /// Which rule fired
        conflict: Conflict,
        /// Human-readable diagnostic naming the devices involved
        description: String,
    },
}

impl DeviceError {
    /// Create an InvalidArgument error.
    pub fn invalid_argument<S: Into<String>>(reason: S) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a MalformedDeviceName error.
    pub fn malformed_device_name<S1, S2>(name: S1, reason: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self::MalformedDeviceName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidIdentifier error.
    pub fn invalid_identifier(id: u32, len: usize) -> Self {
        Self::InvalidIdentifier { id, len }
    }

    /// Create a PreconditionViolation error.
    pub fn precondition_violation<S: Into<String>>(reason: S) -> Self {
        Self::PreconditionViolation {
            reason: reason.into(),
        }
    }

    /// Create a ConflictingDevices error.
    pub fn conflicting_devices<S: Into<String>>(conflict: Conflict, description: S) -> Self {
        Self::ConflictingDevices {
            conflict,
            description: description.into(),
        }
    }

    /// Returns `true` if this error reports an infeasible selection rather
    /// than a hard failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingDevices { .. })
    }
}

/// Result type alias for device operations.
pub type Result<T> = std::result::Result<T, DeviceError>;
