//! Device metadata and SDL joystick GUIDs.
//!
//! [`DeviceMeta`] is a lightweight, cloneable description of a device. Backends
//! populate what they know; unknown fields remain `None`.
//!
//! Mapping databases key their entries by SDL joystick GUID. For USB and
//! Bluetooth devices that GUID is built from the bus type, vendor id, product
//! id and version, so [`DeviceMeta::sdl_guid`] can recover it from metadata.
//!
//! # GUID layout
//! Sixteen bytes, all 16-bit fields little-endian:
//!
//! | bytes | field |
//! |---|---|
//! | 0..2 | bus type |
//! | 2..4 | CRC16 of the name (0 here) |
//! | 4..6 | vendor id |
//! | 6..8 | zero |
//! | 8..10 | product id |
//! | 10..12 | zero |
//! | 12..14 | version |
//! | 14 | driver signature (0) |
//! | 15 | driver data (0) |
//!
//! # Example
//! ```
//! use stickmap::metadata::{sdl_guid_from_parts, BusType};
//!
//! let guid = sdl_guid_from_parts(BusType::Usb, 0x045e, 0x028e, 0x0110);
//! assert_eq!(guid.simple().to_string(), "030000005e0400008e02000010010000");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bus a device is attached through, using SDL's numeric codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusType {
    Usb,
    Bluetooth,
    Virtual,
    Other(u16),
}

impl BusType {
    pub fn code(self) -> u16 {
        match self {
            BusType::Usb => 0x03,
            BusType::Bluetooth => 0x05,
            BusType::Virtual => 0xFF,
            BusType::Other(code) => code,
        }
    }

    /// Parses a bus hint such as `"usb"` or `"bluetooth"` (case-insensitive).
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.to_ascii_lowercase().as_str() {
            "usb" => Some(BusType::Usb),
            "bluetooth" | "bt" => Some(BusType::Bluetooth),
            "virtual" => Some(BusType::Virtual),
            _ => None,
        }
    }
}

/// Snapshot of metadata describing a single device.
///
/// All fields are optional; populate what is known on the current platform.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// High-level bus classification (e.g., `"usb"`, `"bluetooth"`).
    pub bus: Option<String>,

    /// USB Vendor ID (VID), if known.
    pub vid: Option<u16>,

    /// USB Product ID (PID), if known.
    pub pid: Option<u16>,

    /// Device release number (bcdDevice), if known.
    pub version: Option<u16>,

    /// Human-readable product name from the driver/firmware.
    pub product_string: Option<String>,

    /// Device serial number supplied by firmware/OS, if present.
    pub serial_number: Option<String>,

    /// HID interface index (platform-reported).
    ///
    /// Some stacks use `-1` to mean “not applicable”.
    pub interface_number: Option<i32>,

    /// HID Usage Page (e.g., `0x01` for Generic Desktop), if known.
    pub usage_page: Option<u16>,

    /// HID Usage within the page (e.g., `0x04` Joystick, `0x05` Gamepad), if known.
    pub usage: Option<u16>,

    /// OS/topological path to the device. Opaque, platform-specific.
    pub path: Option<String>,
}

impl DeviceMeta {
    /// Bus type parsed from [`DeviceMeta::bus`]; unknown or missing hints
    /// default to USB, which is what most mapping databases assume.
    pub fn bus_type(&self) -> BusType {
        self.bus
            .as_deref()
            .and_then(BusType::from_hint)
            .unwrap_or(BusType::Usb)
    }

    /// SDL joystick GUID for this device, or `None` without both VID and PID.
    pub fn sdl_guid(&self) -> Option<Uuid> {
        let vid = self.vid?;
        let pid = self.pid?;
        Some(sdl_guid_from_parts(
            self.bus_type(),
            vid,
            pid,
            self.version.unwrap_or(0),
        ))
    }
}

/// Builds an SDL joystick GUID (CRC and driver bytes zero).
pub fn sdl_guid_from_parts(bus: BusType, vid: u16, pid: u16, version: u16) -> Uuid {
    let mut bytes = [0u8; 16];
    bytes[0..2].copy_from_slice(&bus.code().to_le_bytes());
    bytes[4..6].copy_from_slice(&vid.to_le_bytes());
    bytes[8..10].copy_from_slice(&pid.to_le_bytes());
    bytes[12..14].copy_from_slice(&version.to_le_bytes());
    Uuid::from_bytes(bytes)
}

/// Clears the CRC (bytes 2..4) and optionally the version (bytes 12..14) of a
/// GUID, for lookups against databases that omit them.
pub(crate) fn strip_guid(guid: Uuid, keep_version: bool) -> Uuid {
    let mut bytes = *guid.as_bytes();
    bytes[2] = 0;
    bytes[3] = 0;
    if !keep_version {
        bytes[12] = 0;
        bytes[13] = 0;
    }
    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xbox_360_guid() {
        let meta = DeviceMeta {
            bus: Some("usb".into()),
            vid: Some(0x045e),
            pid: Some(0x028e),
            version: Some(0x0110),
            ..Default::default()
        };
        assert_eq!(
            meta.sdl_guid().unwrap().simple().to_string(),
            "030000005e0400008e02000010010000"
        );
    }

    #[test]
    fn bluetooth_bus_code() {
        let meta = DeviceMeta {
            bus: Some("Bluetooth".into()),
            vid: Some(0x054c),
            pid: Some(0x05c4),
            ..Default::default()
        };
        assert_eq!(
            meta.sdl_guid().unwrap().simple().to_string(),
            "050000004c050000c405000000000000"
        );
    }

    #[test]
    fn guid_needs_vid_and_pid() {
        let meta = DeviceMeta {
            vid: Some(1),
            ..Default::default()
        };
        assert!(meta.sdl_guid().is_none());
    }

    #[test]
    fn strip_clears_crc_and_version() {
        let guid = Uuid::parse_str("03008fe54c050000c405000011010000").unwrap();
        assert_eq!(
            strip_guid(guid, true).simple().to_string(),
            "030000004c050000c405000011010000"
        );
        assert_eq!(
            strip_guid(guid, false).simple().to_string(),
            "030000004c050000c405000000000000"
        );
    }
}
