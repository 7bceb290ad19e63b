//! End-to-end selection scenarios through the public API.

use jitdevice_core::prelude::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_cpu_gpu_scenario() {
    let mut catalog = DeviceCatalog::new();
    let cpu = catalog.get_or_create_id("/device:CPU:0").unwrap();
    let gpu = catalog.get_or_create_id("/device:GPU:0").unwrap();
    assert_eq!(cpu, DeviceId::new(0));
    assert_eq!(gpu, DeviceId::new(1));
    assert!(catalog.is_cpu(cpu).unwrap());
    assert!(catalog.is_gpu(gpu).unwrap());

    let both: DeviceSet = [cpu, gpu].into_iter().collect();
    assert_eq!(try_pick_device(&catalog, &both, false).unwrap(), gpu);
    assert_eq!(
        catalog.describe_set(&both),
        "[/device:CPU:0,/device:GPU:0]"
    );

    let only_cpu: DeviceSet = [cpu].into_iter().collect();
    assert_eq!(try_pick_device(&catalog, &only_cpu, false).unwrap(), cpu);
}

#[test]
fn test_two_cpu_names_conflict() {
    let mut catalog = DeviceCatalog::new();
    let devices = catalog
        .intern_all([
            "/job:localhost/replica:0/task:0/device:CPU:0",
            "/job:worker/replica:0/task:1/device:CPU:0",
        ])
        .unwrap();

    assert!(!can_pick_device(&catalog, &devices, false).unwrap());
    assert!(!can_pick_device(&catalog, &devices, true).unwrap());
}

#[test]
fn test_sets_accumulate_across_nodes() {
    // Each node of a cluster contributes its own set; the cluster's set is
    // the union of all of them.
    let mut catalog = DeviceCatalog::new();
    let node_a = catalog.intern_all(["/device:CPU:0"]).unwrap();
    let node_b = catalog.intern_all(["/device:GPU:0"]).unwrap();
    let node_c = catalog.intern_all(["/device:CPU:0"]).unwrap();

    let mut cluster = DeviceSet::new();
    for node in [&node_a, &node_b, &node_c] {
        cluster.union_with(node);
    }

    assert_eq!(cluster.len(), 2);
    let picked = try_pick_device(&catalog, &cluster, false).unwrap();
    assert_eq!(catalog.name_for(picked).unwrap(), "/device:GPU:0");
    assert_eq!(
        catalog.compilation_device_name(picked).unwrap(),
        Some("XLA_GPU_JIT")
    );
}

#[test]
fn test_selection_outcome_carries_diagnostic() {
    let mut catalog = DeviceCatalog::new();
    let devices = catalog
        .intern_all(["/device:CPU:0", "/device:XLA_FOO:0"])
        .unwrap();

    let selection = DeviceSelector::default().select(&catalog, &devices).unwrap();
    assert_eq!(
        selection,
        Selection::Infeasible {
            conflict: Conflict::UnknownAndCpu,
            description: "Found both unknown and CPU devices: /device:XLA_FOO:0, /device:CPU:0"
                .to_string(),
        }
    );
    assert!(selection.device().is_none());

    let permissive = DeviceSelector::new(SelectionConfig::new(true));
    let picked = permissive.try_pick_device(&catalog, &devices).unwrap();
    assert_eq!(catalog.kind_of(picked).unwrap(), DeviceKind::Other);
}

#[test]
fn test_custom_registry_backends() {
    let registry = StandardRegistry::new().with_backend(
        "TPU",
        BackendRegistration::new("XLA_TPU_JIT", AutoclusteringPolicy::Always),
    );
    let mut catalog = DeviceCatalog::with_registry(Arc::new(registry));
    let tpu = catalog.get_or_create_id("/device:TPU:0").unwrap();

    let backend = catalog.compilation_backend(tpu).unwrap().unwrap();
    assert_eq!(backend.compilation_device_name, "XLA_TPU_JIT");
    assert_eq!(backend.autoclustering_policy, AutoclusteringPolicy::Always);

    let devices: DeviceSet = [tpu].into_iter().collect();
    assert_eq!(try_pick_device(&catalog, &devices, false).unwrap(), tpu);
}

#[test]
fn test_errors_pass_through_can_pick() {
    let mut catalog = DeviceCatalog::new();
    assert!(matches!(
        catalog.get_or_create_id("not a device"),
        Err(DeviceError::MalformedDeviceName { .. })
    ));

    let foreign: DeviceSet = [DeviceId::new(0)].into_iter().collect();
    assert!(matches!(
        can_pick_device(&catalog, &foreign, false),
        Err(DeviceError::InvalidIdentifier { id: 0, len: 0 })
    ));
    assert!(matches!(
        can_pick_device(&catalog, &DeviceSet::new(), false),
        Err(DeviceError::PreconditionViolation { .. })
    ));
}

#[test]
fn test_shared_catalog_selection() {
    let shared = SharedDeviceCatalog::new(DeviceCatalog::new());
    let cpu = shared.get_or_create_id("/device:CPU:0").unwrap();
    let tpu = shared.get_or_create_id("/device:TPU:0").unwrap();
    let devices: DeviceSet = [cpu, tpu].into_iter().collect();

    let catalog = shared.read();
    assert!(!can_pick_device(&catalog, &devices, false).unwrap());
    assert_eq!(try_pick_device(&catalog, &devices, true).unwrap(), tpu);
}
