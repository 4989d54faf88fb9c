//! Decoded device mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::binding::BindingEntry;
use crate::error::MappingError;

/// Structured form of one SDL mapping line.
///
/// Immutable once built; bindings keep the order they had in the line,
/// including repeated targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMapping {
    id: Uuid,
    name: String,
    bindings: Vec<BindingEntry>,
}

impl DeviceMapping {
    pub fn new(id: Uuid, name: impl Into<String>, bindings: Vec<BindingEntry>) -> Self {
        Self {
            id,
            name: name.into(),
            bindings,
        }
    }

    /// Joystick GUID this mapping applies to.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Human-readable device name, as written in the line.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bindings in line order.
    #[inline]
    pub fn bindings(&self) -> &[BindingEntry] {
        &self.bindings
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, BindingEntry> {
        self.bindings.iter()
    }
}

impl<'a> IntoIterator for &'a DeviceMapping {
    type Item = &'a BindingEntry;
    type IntoIter = std::slice::Iter<'a, BindingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl FromStr for DeviceMapping {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::decoder::decode(s)
    }
}

/// Re-encodes the SDL line: 32-digit GUID, name, then `key:spec,` per binding.
///
/// Unmapped targets are written with an empty key and do not survive a
/// second decode as the same key.
impl fmt::Display for DeviceMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},", self.id.simple(), self.name)?;
        for entry in &self.bindings {
            write!(f, "{entry},")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{Button, HatPosition, SourceDescriptor, TargetDescriptor};

    const XBOX: &str = "030000005e0400008e02000010010000,Xbox 360 Controller,a:b0,b:b1,leftx:a0,dpup:h0.1,";

    #[test]
    fn display_matches_sdl_line() {
        let m: DeviceMapping = XBOX.parse().unwrap();
        assert_eq!(m.to_string(), XBOX);
    }

    #[test]
    fn iterates_in_order() {
        let m: DeviceMapping = XBOX.parse().unwrap();
        let targets: Vec<_> = m.iter().map(|e| e.target).collect();
        assert_eq!(targets.len(), 4);
        assert_eq!(targets[0], TargetDescriptor::Button(Button::A));
        assert_eq!(
            m.bindings()[3].source,
            SourceDescriptor::Hat {
                hat: 0,
                position: HatPosition::Up
            }
        );
    }

    #[test]
    fn serializes_to_json() {
        let m: DeviceMapping = "030000005e0400008e02000010010000,Pad,a:b0".parse().unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["name"], "Pad");
        assert_eq!(json["id"], "03000000-5e04-0000-8e02-000010010000");
        assert_eq!(json["bindings"][0]["target"]["Button"], "A");
        assert_eq!(json["bindings"][0]["source"]["Button"]["index"], 0);

        let back: DeviceMapping = serde_json::from_value(json).unwrap();
        assert_eq!(back, m);
    }
}
