//! HID device discovery via `hidapi`.
//!
//! Enumerates game-controller HID endpoints and describes each as a
//! [`DeviceMeta`] so it can be matched against a
//! [`MappingDatabase`](crate::database::MappingDatabase).

use hidapi::{DeviceInfo, HidApi};
use std::collections::HashSet;

use crate::metadata::DeviceMeta;

/// Decide whether a `hidapi` device entry is a game controller.
///
/// Accepts Generic Desktop (`0x01`) joystick (`0x04`), gamepad (`0x05`) and
/// multi-axis controller (`0x08`) usages.
fn accept_device(info: &DeviceInfo) -> bool {
    info.usage_page() == 0x01 && matches!(info.usage(), 0x04 | 0x05 | 0x08)
}

fn bus_hint(info: &DeviceInfo) -> Option<String> {
    match info.bus_type() {
        hidapi::BusType::Usb => Some("usb".to_string()),
        hidapi::BusType::Bluetooth => Some("bluetooth".to_string()),
        _ => None,
    }
}

/// Builds metadata for one hidapi entry.
pub fn describe(info: &DeviceInfo) -> DeviceMeta {
    DeviceMeta {
        bus: bus_hint(info),
        vid: Some(info.vendor_id()),
        pid: Some(info.product_id()),
        version: Some(info.release_number()),
        product_string: info.product_string().map(str::to_string),
        serial_number: info.serial_number().map(str::to_string),
        interface_number: Some(info.interface_number()),
        usage_page: Some(info.usage_page()),
        usage: Some(info.usage()),
        path: Some(info.path().to_string_lossy().into_owned()),
    }
}

/// Lists accepted devices, one entry per OS path.
pub fn probe_devices(api: &HidApi) -> Vec<DeviceMeta> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for info in api.device_list() {
        if !accept_device(info) {
            continue;
        }
        if !seen.insert(info.path().to_owned()) {
            continue;
        }
        found.push(describe(info));
    }

    log::debug!("discovered {} HID game controller(s)", found.len());
    found
}
