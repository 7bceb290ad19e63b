//! Example: choosing the compilation device for a few clusters.

use jitdevice_core::prelude::*;

fn main() -> Result<()> {
    println!("Single-device selection");
    println!("=======================\n");

    let mut catalog = DeviceCatalog::new();

    let clusters: [(&str, &[&str]); 4] = [
        ("cpu only", &["/job:localhost/replica:0/task:0/device:CPU:0"]),
        (
            "cpu + gpu",
            &[
                "/job:localhost/replica:0/task:0/device:CPU:0",
                "/job:localhost/replica:0/task:0/device:GPU:0",
            ],
        ),
        (
            "two gpus",
            &[
                "/job:localhost/replica:0/task:0/device:GPU:0",
                "/job:localhost/replica:0/task:0/device:GPU:1",
            ],
        ),
        (
            "cpu + tpu",
            &[
                "/job:localhost/replica:0/task:0/device:CPU:0",
                "/job:localhost/replica:0/task:0/device:TPU:0",
            ],
        ),
    ];

    for (label, names) in clusters {
        let devices = catalog.intern_all(names.iter().copied())?;
        println!("{}: {}", label, catalog.describe_set(&devices));

        for allow in [false, true] {
            match DeviceSelector::new(SelectionConfig::new(allow)).select(&catalog, &devices)? {
                Selection::Picked(device) => println!(
                    "  allow_mixing={:<5} -> {} (compiles as {})",
                    allow,
                    catalog.name_for(device)?,
                    catalog.compilation_device_name(device)?.unwrap_or("<no backend>")
                ),
                Selection::Infeasible { description, .. } => {
                    println!("  allow_mixing={:<5} -> infeasible: {}", allow, description)
                }
            }
        }
        println!();
    }

    Ok(())
}
