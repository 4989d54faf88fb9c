use std::env;
use std::process::ExitCode;

use stickmap::{decode, MappingDatabase, StickmapConfig};

/// Decodes mapping lines given on the command line, or loads a config file
/// with `--config <path>` and matches connected HID controllers against it.
fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    if let [flag, path] = args.as_slice() {
        if flag == "--config" {
            return match StickmapConfig::load(path).and_then(|c| Ok(c.build_database()?)) {
                Ok(db) => {
                    list_devices(&db);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            };
        }
    }

    let mut status = ExitCode::SUCCESS;
    for line in &args {
        match decode(line) {
            Ok(mapping) => {
                println!("{} ({})", mapping.name(), mapping.id().simple());
                for entry in mapping.bindings() {
                    println!("  {:?} <- {:?}", entry.target, entry.source);
                }
            }
            Err(e) => {
                eprintln!("error: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }

    if args.is_empty() {
        list_devices(&MappingDatabase::new());
    }

    status
}

#[cfg(feature = "hid")]
fn list_devices(db: &MappingDatabase) {
    match stickmap::backends::probe_devices() {
        Ok(devices) => {
            for meta in devices {
                let label = meta.product_string.as_deref().unwrap_or("Unknown");
                match db.find_by_meta(&meta) {
                    Some(m) => println!("{label}: {}", m.name()),
                    None => println!("{label}: no mapping"),
                }
            }
        }
        Err(e) => eprintln!("HID discovery failed: {e}"),
    }
}

#[cfg(not(feature = "hid"))]
fn list_devices(db: &MappingDatabase) {
    println!("{} mapping(s) loaded; HID discovery disabled", db.len());
}
