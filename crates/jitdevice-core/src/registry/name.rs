//! Parsing of fully-qualified device names.
//!
//! Accepted forms, with every component optional and `*` as a wildcard:
//!
//! ```text
//! /job:<name>/replica:<n>/task:<n>/device:<TYPE>:<n>
//! /job:<name>/replica:<n>/task:<n>/cpu:<n>      (legacy)
//! /job:<name>/replica:<n>/task:<n>/gpu:<n>      (legacy)
//! ```
//!
//! # Example
//!
//! ```
//! use jitdevice_core::registry::DeviceName;
//!
//! let name = DeviceName::parse("/job:worker/replica:0/task:1/device:GPU:2").unwrap();
//! assert_eq!(name.device_type.as_deref(), Some("GPU"));
//! assert_eq!(name.id, Some(2));
//! ```

use crate::device::{DEVICE_CPU, DEVICE_GPU};
use crate::error::{DeviceError, Result};
use std::fmt;

/// Components of a parsed device name. `None` means unspecified or `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceName {
    /// Job name
    pub job: Option<String>,
    /// Replica index
    pub replica: Option<u32>,
    /// Task index
    pub task: Option<u32>,
    /// Device type, e.g. `CPU`
    pub device_type: Option<String>,
    /// Device index within its type
    pub id: Option<u32>,
}

impl DeviceName {
    /// Parses a fully-qualified device name.
    ///
    /// The empty string and `/` parse to a name with no components.
    pub fn parse(fullname: &str) -> Result<Self> {
        let mut parsed = Self::default();
        if fullname.is_empty() || fullname == "/" {
            return Ok(parsed);
        }

        let malformed = |reason: String| DeviceError::malformed_device_name(fullname, reason);

        let rest = fullname
            .strip_prefix('/')
            .ok_or_else(|| malformed("name must start with '/'".to_string()))?;

        for component in rest.split('/') {
            let (key, value) = component
                .split_once(':')
                .ok_or_else(|| malformed(format!("bad component '{}'", component)))?;

            match key {
                "job" => {
                    parsed.job = match value {
                        "*" => None,
                        _ if is_identifier(value) => Some(value.to_string()),
                        _ => return Err(malformed(format!("bad job name '{}'", value))),
                    };
                }
                "replica" => parsed.replica = parse_index(value).map_err(malformed)?,
                "task" => parsed.task = parse_index(value).map_err(malformed)?,
                "device" => {
                    let (device_type, id) = match value.split_once(':') {
                        Some((device_type, id)) => (device_type, Some(id)),
                        None => (value, None),
                    };
                    parsed.device_type = match device_type {
                        "*" => None,
                        _ if is_identifier(device_type) => Some(device_type.to_string()),
                        _ => {
                            return Err(malformed(format!("bad device type '{}'", device_type)))
                        }
                    };
                    parsed.id = match id {
                        Some(id) => parse_index(id).map_err(malformed)?,
                        None => None,
                    };
                }
                "cpu" | "CPU" => {
                    parsed.device_type = Some(DEVICE_CPU.to_string());
                    parsed.id = parse_index(value).map_err(malformed)?;
                }
                "gpu" | "GPU" => {
                    parsed.device_type = Some(DEVICE_GPU.to_string());
                    parsed.id = parse_index(value).map_err(malformed)?;
                }
                _ => return Err(malformed(format!("unknown component '{}'", key))),
            }
        }

        Ok(parsed)
    }

    /// Returns `true` if every component is specified.
    pub fn is_fully_specified(&self) -> bool {
        self.job.is_some()
            && self.replica.is_some()
            && self.task.is_some()
            && self.device_type.is_some()
            && self.id.is_some()
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_any = false;
        if let Some(job) = &self.job {
            write!(f, "/job:{}", job)?;
            wrote_any = true;
        }
        if let Some(replica) = self.replica {
            write!(f, "/replica:{}", replica)?;
            wrote_any = true;
        }
        if let Some(task) = self.task {
            write!(f, "/task:{}", task)?;
            wrote_any = true;
        }
        match (&self.device_type, self.id) {
            (Some(device_type), Some(id)) => write!(f, "/device:{}:{}", device_type, id),
            (Some(device_type), None) => write!(f, "/device:{}:*", device_type),
            (None, Some(id)) => write!(f, "/device:*:{}", id),
            (None, None) if !wrote_any => f.write_str("/"),
            (None, None) => Ok(()),
        }
    }
}

/// `[A-Za-z][A-Za-z0-9_]*`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_index(value: &str) -> std::result::Result<Option<u32>, String> {
    if value == "*" {
        return Ok(None);
    }
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("bad index '{}'", value));
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| format!("index '{}' out of range", value))
}
