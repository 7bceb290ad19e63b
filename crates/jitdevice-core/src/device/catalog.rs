//! Interning of device names and per-device classification cache.
//!
//! A [`DeviceCatalog`] maps device name strings to dense [`DeviceId`]s and
//! remembers, for every interned device, its kind and whether a compilation
//! backend is registered for that kind. Catalogs are explicit context
//! objects: callers construct one per compilation session and pass it by
//! reference. They grow monotonically and never forget a device.

use super::id::{DeviceId, DeviceKind};
use super::set::DeviceSet;
use crate::config::default_registry;
use crate::error::{DeviceError, Result};
use crate::registry::{BackendHandle, DeviceRegistry};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Per-session table of interned devices.
///
/// All per-device vectors are indexed by [`DeviceId`] and always have the
/// same length; an identifier is valid iff it is below that length.
#[derive(Clone)]
pub struct DeviceCatalog {
    registry: Arc<dyn DeviceRegistry>,
    name_to_id: HashMap<String, DeviceId>,
    names: Vec<String>,
    kind_names: Vec<String>,
    kinds: Vec<DeviceKind>,
    compilation_backends: Vec<Option<BackendHandle>>,
}

impl DeviceCatalog {
    /// Creates an empty catalog backed by the process-wide standard registry.
    pub fn new() -> Self {
        Self::with_registry(default_registry().clone())
    }

    /// Creates an empty catalog backed by `registry`.
    pub fn with_registry(registry: Arc<dyn DeviceRegistry>) -> Self {
        Self {
            registry,
            name_to_id: HashMap::new(),
            names: Vec::new(),
            kind_names: Vec::new(),
            kinds: Vec::new(),
            compilation_backends: Vec::new(),
        }
    }

    /// Returns the identifier for `name`, interning it on first sight.
    ///
    /// A name seen before is a pure lookup. A new name is resolved through
    /// the registry; if resolution fails the catalog is left unchanged.
    pub fn get_or_create_id(&mut self, name: &str) -> Result<DeviceId> {
        if name.is_empty() {
            return Err(DeviceError::invalid_argument("device name must not be empty"));
        }

        if let Some(&id) = self.name_to_id.get(name) {
            trace!(device = name, id = id.id(), "device already interned");
            return Ok(id);
        }

        let kind_name = self.registry.resolve_kind(name).map_err(|err| match err {
            DeviceError::MalformedDeviceName { .. } => err,
            other => DeviceError::malformed_device_name(name, other.to_string()),
        })?;

        let id = u32::try_from(self.names.len())
            .map(DeviceId::new)
            .map_err(|_| DeviceError::precondition_violation("device catalog is full"))?;
        let kind = DeviceKind::from_kind_name(&kind_name);
        let backend = self.registry.compilation_backend(&kind_name);

        debug!(
            device = name,
            id = id.id(),
            kind = %kind,
            kind_name = kind_name.as_str(),
            has_backend = backend.is_some(),
            "interned device"
        );

        self.names.push(name.to_string());
        self.kind_names.push(kind_name);
        self.kinds.push(kind);
        self.compilation_backends.push(backend);
        self.name_to_id.insert(name.to_string(), id);

        Ok(id)
    }

    /// Interns every name and collects the identifiers into a set.
    pub fn intern_all<'a, I>(&mut self, names: I) -> Result<DeviceSet>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = DeviceSet::new();
        for name in names {
            set.insert(self.get_or_create_id(name)?);
        }
        Ok(set)
    }

    /// Looks up `name` without interning it.
    pub fn id_for(&self, name: &str) -> Option<DeviceId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of interned devices.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no device has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` if `id` was handed out by this catalog.
    pub fn is_valid(&self, id: DeviceId) -> bool {
        id.index() < self.names.len()
    }

    fn index(&self, id: DeviceId) -> Result<usize> {
        if self.is_valid(id) {
            Ok(id.index())
        } else {
            Err(DeviceError::invalid_identifier(id.id(), self.names.len()))
        }
    }

    /// Kind of the device.
    pub fn kind_of(&self, id: DeviceId) -> Result<DeviceKind> {
        Ok(self.kinds[self.index(id)?])
    }

    /// Returns `true` if the device is a CPU.
    pub fn is_cpu(&self, id: DeviceId) -> Result<bool> {
        Ok(self.kind_of(id)? == DeviceKind::Cpu)
    }

    /// Returns `true` if the device is a GPU.
    pub fn is_gpu(&self, id: DeviceId) -> Result<bool> {
        Ok(self.kind_of(id)? == DeviceKind::Gpu)
    }

    /// Original name the device was interned under.
    pub fn name_for(&self, id: DeviceId) -> Result<&str> {
        Ok(&self.names[self.index(id)?])
    }

    /// Raw kind string the registry resolved for the device.
    pub fn kind_name_for(&self, id: DeviceId) -> Result<&str> {
        Ok(&self.kind_names[self.index(id)?])
    }

    /// Compilation backend registered for the device's kind, if any.
    pub fn compilation_backend(&self, id: DeviceId) -> Result<Option<&BackendHandle>> {
        Ok(self.compilation_backends[self.index(id)?].as_ref())
    }

    /// Name of the compilation device for the device's kind, if any.
    pub fn compilation_device_name(&self, id: DeviceId) -> Result<Option<&str>> {
        Ok(self
            .compilation_backend(id)?
            .map(|backend| backend.compilation_device_name.as_str()))
    }

    /// Registry this catalog resolves names through.
    pub fn registry(&self) -> &Arc<dyn DeviceRegistry> {
        &self.registry
    }

    /// Renders `devices` as `[name1,name2,...]` in ascending id order.
    ///
    /// Diagnostics only. Identifiers unknown to this catalog render as
    /// `<invalid:N>` so that building an error message never fails.
    pub fn describe_set(&self, devices: &DeviceSet) -> String {
        let names: Vec<String> = devices
            .iter()
            .map(|id| match self.name_for(id) {
                Ok(name) => name.to_string(),
                Err(_) => format!("<invalid:{}>", id.id()),
            })
            .collect();

        format!("[{}]", names.join(","))
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DeviceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCatalog")
            .field("registry", &self.registry)
            .field("devices", &self.names)
            .field("kinds", &self.kinds)
            .finish()
    }
}

/// A [`DeviceCatalog`] shared between threads.
///
/// Interning takes the write lock; everything else runs under the read lock.
#[derive(Debug, Clone, Default)]
pub struct SharedDeviceCatalog {
    inner: Arc<RwLock<DeviceCatalog>>,
}

impl SharedDeviceCatalog {
    /// Wraps `catalog` for shared use.
    pub fn new(catalog: DeviceCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Returns the identifier for `name`, interning it on first sight.
    pub fn get_or_create_id(&self, name: &str) -> Result<DeviceId> {
        if let Some(id) = self.inner.read().id_for(name) {
            return Ok(id);
        }
        self.inner.write().get_or_create_id(name)
    }

    /// Read access to the catalog, e.g. for running a selection.
    ///
    /// Drop the guard before calling [`get_or_create_id`](Self::get_or_create_id)
    /// on the same thread: interning a new name while holding it deadlocks.
    pub fn read(&self) -> RwLockReadGuard<'_, DeviceCatalog> {
        self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StandardRegistry;
    use std::thread;

    #[test]
    fn test_ids_are_dense_and_stable() {
        let mut catalog = DeviceCatalog::new();
        let cpu = catalog.get_or_create_id("/device:CPU:0").unwrap();
        let gpu = catalog.get_or_create_id("/device:GPU:0").unwrap();

        assert_eq!(cpu, DeviceId::new(0));
        assert_eq!(gpu, DeviceId::new(1));
        assert_eq!(catalog.get_or_create_id("/device:CPU:0").unwrap(), cpu);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_classification() {
        let mut catalog = DeviceCatalog::new();
        let cpu = catalog.get_or_create_id("/job:worker/replica:0/task:0/device:CPU:0").unwrap();
        let gpu = catalog.get_or_create_id("/device:GPU:1").unwrap();
        let tpu = catalog.get_or_create_id("/device:TPU:0").unwrap();

        assert!(catalog.is_cpu(cpu).unwrap());
        assert!(!catalog.is_gpu(cpu).unwrap());
        assert!(catalog.is_gpu(gpu).unwrap());
        assert_eq!(catalog.kind_of(tpu).unwrap(), DeviceKind::Other);
        assert_eq!(catalog.kind_name_for(tpu).unwrap(), "TPU");
    }

    #[test]
    fn test_backend_availability_is_cached() {
        let mut catalog = DeviceCatalog::new();
        let cpu = catalog.get_or_create_id("/device:CPU:0").unwrap();
        let tpu = catalog.get_or_create_id("/device:TPU:0").unwrap();

        assert_eq!(
            catalog.compilation_device_name(cpu).unwrap(),
            Some("XLA_CPU_JIT")
        );
        assert!(catalog.compilation_backend(tpu).unwrap().is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut catalog = DeviceCatalog::new();
        let err = catalog.get_or_create_id("").unwrap_err();
        assert!(matches!(err, DeviceError::InvalidArgument { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_name_leaves_catalog_unchanged() {
        let mut catalog = DeviceCatalog::new();
        catalog.get_or_create_id("/device:CPU:0").unwrap();

        let err = catalog.get_or_create_id("device:GPU:0").unwrap_err();
        assert!(matches!(err, DeviceError::MalformedDeviceName { .. }));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.id_for("device:GPU:0").is_none());

        // The next successful insertion still gets the next dense id.
        let gpu = catalog.get_or_create_id("/device:GPU:0").unwrap();
        assert_eq!(gpu, DeviceId::new(1));
    }

    #[derive(Debug)]
    struct OfflineRegistry;

    impl DeviceRegistry for OfflineRegistry {
        fn resolve_kind(&self, _name: &str) -> Result<String> {
            Err(DeviceError::precondition_violation("registry offline"))
        }

        fn compilation_backend(&self, _kind: &str) -> Option<BackendHandle> {
            None
        }
    }

    #[test]
    fn test_registry_failure_reported_as_malformed_name() {
        let mut catalog = DeviceCatalog::with_registry(Arc::new(OfflineRegistry));

        let err = catalog.get_or_create_id("/device:CPU:0").unwrap_err();
        assert_eq!(
            err,
            DeviceError::malformed_device_name(
                "/device:CPU:0",
                "Precondition violated: registry offline"
            )
        );
        assert!(catalog.is_empty());
        assert!(catalog.id_for("/device:CPU:0").is_none());
    }

    #[test]
    fn test_out_of_range_identifier() {
        let mut catalog = DeviceCatalog::new();
        catalog.get_or_create_id("/device:CPU:0").unwrap();

        let bogus = DeviceId::new(3);
        assert!(!catalog.is_valid(bogus));
        assert_eq!(
            catalog.is_cpu(bogus).unwrap_err(),
            DeviceError::invalid_identifier(3, 1)
        );
        assert!(catalog.name_for(bogus).is_err());
        assert!(catalog.compilation_backend(bogus).is_err());
    }

    #[test]
    fn test_describe_set() {
        let mut catalog = DeviceCatalog::new();
        let set = catalog
            .intern_all(["/device:GPU:0", "/device:CPU:0"])
            .unwrap();

        // Ascending id order, not insertion order into the set.
        assert_eq!(
            catalog.describe_set(&set),
            "[/device:GPU:0,/device:CPU:0]"
        );
        assert_eq!(catalog.describe_set(&DeviceSet::new()), "[]");

        let mut with_bogus = set.clone();
        with_bogus.insert(DeviceId::new(9));
        assert_eq!(
            catalog.describe_set(&with_bogus),
            "[/device:GPU:0,/device:CPU:0,<invalid:9>]"
        );
    }

    #[test]
    fn test_custom_registry() {
        let registry = StandardRegistry::empty();
        let mut catalog = DeviceCatalog::with_registry(Arc::new(registry));
        let cpu = catalog.get_or_create_id("/device:CPU:0").unwrap();

        assert!(catalog.is_cpu(cpu).unwrap());
        assert!(catalog.compilation_backend(cpu).unwrap().is_none());
    }

    #[test]
    fn test_shared_catalog_interns_once() {
        let shared = SharedDeviceCatalog::default();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..8)
                        .map(|i| shared.get_or_create_id(&format!("/device:GPU:{}", i)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<DeviceId>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for ids in &results[1..] {
            assert_eq!(ids, &results[0]);
        }
        assert_eq!(shared.read().len(), 8);
    }
}
