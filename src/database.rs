//! Mapping database.
//!
//! A [`MappingDatabase`] holds decoded mappings keyed by joystick GUID, loaded
//! from text in the `gamecontrollerdb.txt` layout: one mapping per line, `#`
//! starts a comment line, blank lines are ignored.
//!
//! # Per-line errors
//! What happens when a line fails to decode is chosen by [`LinePolicy`]:
//! - [`LinePolicy::Skip`] logs a warning, records the failure in the returned
//!   [`LoadReport`] and moves on.
//! - [`LinePolicy::Abort`] stops at the first bad line and returns
//!   [`DatabaseError::Line`]. Mappings from earlier lines stay loaded.
//!
//! # Platform fields
//! Lines may carry a `platform:<name>` field. Lines for another platform are
//! left out (counted in [`LoadReport::other_platform`]); for the current
//! platform the field is dropped before decoding, since it is not a binding.
//!
//! # Duplicates
//! A later line with a GUID already present replaces the earlier mapping in
//! place; iteration order keeps the position of the first appearance.
//!
//! # Example
//! ```
//! use stickmap::database::{LinePolicy, MappingDatabase};
//!
//! let text = "\
//! ## Xbox
//! 030000005e0400008e02000010010000,Xbox 360 Controller,a:b0,b:b1,
//! broken line
//! ";
//! let mut db = MappingDatabase::new();
//! let report = db.load_str(text, LinePolicy::Skip).unwrap();
//! assert_eq!(report.loaded, 1);
//! assert_eq!(report.skipped[0].line, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::decoder::decode;
use crate::error::{DatabaseError, MappingError};
use crate::mapping::DeviceMapping;
use crate::metadata::{strip_guid, DeviceMeta};

const PLATFORM_KEY: &str = "platform:";

/// Platform name as written in SDL mapping databases.
pub const CURRENT_PLATFORM: &str = if cfg!(target_os = "windows") {
    "Windows"
} else if cfg!(target_os = "macos") {
    "Mac OS X"
} else if cfg!(target_os = "android") {
    "Android"
} else if cfg!(target_os = "ios") {
    "iOS"
} else {
    "Linux"
};

/// `None` if the line targets another platform; otherwise the line without
/// its `platform:` field. GUID and name never count as the field.
fn select_platform(line: &str) -> Option<Cow<'_, str>> {
    let Some(platform) = line
        .split(',')
        .skip(2)
        .find_map(|field| field.strip_prefix(PLATFORM_KEY))
    else {
        return Some(Cow::Borrowed(line));
    };

    if platform != CURRENT_PLATFORM {
        return None;
    }

    let kept: Vec<&str> = line
        .split(',')
        .enumerate()
        .filter(|(i, field)| *i < 2 || !field.starts_with(PLATFORM_KEY))
        .map(|(_, field)| field)
        .collect();
    Some(Cow::Owned(kept.join(",")))
}

/// What to do with a line that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePolicy {
    #[default]
    Skip,
    Abort,
}

/// A line that was skipped under [`LinePolicy::Skip`].
#[derive(Debug)]
pub struct LineError {
    /// 1-based line number in the loaded text.
    pub line: usize,
    pub error: MappingError,
}

/// Outcome of one load call.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Mappings decoded (replacements included).
    pub loaded: usize,
    /// Lines left out because their `platform:` field names another platform.
    pub other_platform: usize,
    pub skipped: Vec<LineError>,
}

/// Decoded mappings indexed by GUID.
#[derive(Debug, Clone, Default)]
pub struct MappingDatabase {
    mappings: Vec<DeviceMapping>,
    index: HashMap<Uuid, usize>,
}

impl MappingDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a database from text, discarding the report.
    pub fn parse_str(text: &str, policy: LinePolicy) -> Result<Self, DatabaseError> {
        let mut db = Self::new();
        db.load_str(text, policy)?;
        Ok(db)
    }

    /// Decodes every mapping line of `text` into the database.
    pub fn load_str(&mut self, text: &str, policy: LinePolicy) -> Result<LoadReport, DatabaseError> {
        let mut report = LoadReport::default();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(selected) = select_platform(trimmed) else {
                report.other_platform += 1;
                continue;
            };

            match decode(&selected) {
                Ok(mapping) => {
                    self.insert(mapping);
                    report.loaded += 1;
                }
                Err(error) => match policy {
                    LinePolicy::Abort => return Err(DatabaseError::Line { line, source: error }),
                    LinePolicy::Skip => {
                        log::warn!("skipping mapping line {line}: {error}");
                        report.skipped.push(LineError { line, error });
                    }
                },
            }
        }

        Ok(report)
    }

    /// Reads and loads a mapping database file.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        policy: LinePolicy,
    ) -> Result<LoadReport, DatabaseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatabaseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let report = self.load_str(&text, policy)?;
        log::debug!(
            "loaded {} mapping(s) from {:?} ({} skipped)",
            report.loaded,
            path,
            report.skipped.len()
        );
        Ok(report)
    }

    /// Decodes one line and inserts it.
    pub fn insert_line(&mut self, line: &str) -> Result<Uuid, MappingError> {
        let mapping = decode(line)?;
        let id = mapping.id();
        self.insert(mapping);
        Ok(id)
    }

    /// Inserts a mapping, returning the one it replaced (same GUID), if any.
    pub fn insert(&mut self, mapping: DeviceMapping) -> Option<DeviceMapping> {
        match self.index.get(&mapping.id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.mappings[slot], mapping)),
            None => {
                self.index.insert(mapping.id(), self.mappings.len());
                self.mappings.push(mapping);
                None
            }
        }
    }

    /// Exact GUID lookup.
    pub fn get(&self, id: &Uuid) -> Option<&DeviceMapping> {
        self.index.get(id).map(|&slot| &self.mappings[slot])
    }

    /// GUID lookup that tolerates CRC and version differences.
    ///
    /// Tries an exact hit first, then compares with the CRC cleared on both
    /// sides, then with CRC and version cleared.
    pub fn find(&self, id: &Uuid) -> Option<&DeviceMapping> {
        if let Some(hit) = self.get(id) {
            return Some(hit);
        }

        [true, false].into_iter().find_map(|keep_version| {
            let want = strip_guid(*id, keep_version);
            self.mappings
                .iter()
                .find(|m| strip_guid(m.id(), keep_version) == want)
        })
    }

    /// Finds the mapping for a discovered device via its SDL GUID.
    pub fn find_by_meta(&self, meta: &DeviceMeta) -> Option<&DeviceMapping> {
        self.find(&meta.sdl_guid()?)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mappings in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceMapping> {
        self.mappings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_text() -> String {
        format!(
            "\
# Controllers
030000005e0400008e02000010010000,Xbox 360 Controller,a:b0,b:b1,leftx:a0,platform:{CURRENT_PLATFORM},

   \t
030000004c050000c405000000000000,PS4 Controller,a:b1,b:b2,dpup:h0.1,
"
        )
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let mut db = MappingDatabase::new();
        let report = db.load_str(&db_text(), LinePolicy::Abort).unwrap();
        assert_eq!(report.loaded, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(db.len(), 2);
        let names: Vec<_> = db.iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Xbox 360 Controller", "PS4 Controller"]);
    }

    #[test]
    fn skip_policy_reports_line_numbers() {
        let text = format!("{}nonsense\n030000005e0400008e02000010010000,X,a:q1\n", db_text());
        let mut db = MappingDatabase::new();
        let report = db.load_str(&text, LinePolicy::Skip).unwrap();
        assert_eq!(report.loaded, 2);
        let lines: Vec<_> = report.skipped.iter().map(|e| e.line).collect();
        assert_eq!(lines, [6, 7]);
        assert!(matches!(
            report.skipped[0].error,
            MappingError::MalformedInput { .. }
        ));
        assert!(matches!(
            report.skipped[1].error,
            MappingError::UnrecognizedSource { .. }
        ));
    }

    #[test]
    fn abort_policy_stops_at_first_bad_line() {
        let text = "030000005e0400008e02000010010000,X,a:b0\nbad,line\n030000004c050000c405000000000000,P,a:b1\n";
        let mut db = MappingDatabase::new();
        match db.load_str(text, LinePolicy::Abort).unwrap_err() {
            DatabaseError::Line { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn duplicate_guid_replaces_in_place() {
        let text = "\
030000005e0400008e02000010010000,Old,a:b0
030000004c050000c405000000000000,PS4,a:b1
030000005e0400008e02000010010000,New,a:b3
";
        let db = MappingDatabase::parse_str(text, LinePolicy::Abort).unwrap();
        assert_eq!(db.len(), 2);
        let first = db.iter().next().unwrap();
        assert_eq!(first.name(), "New");
    }

    #[test]
    fn insert_returns_replaced() {
        let mut db = MappingDatabase::new();
        let id = db
            .insert_line("030000005e0400008e02000010010000,Old,a:b0")
            .unwrap();
        let old = db
            .insert("030000005e0400008e02000010010000,New,a:b0".parse().unwrap())
            .unwrap();
        assert_eq!(old.name(), "Old");
        assert_eq!(db.get(&id).unwrap().name(), "New");
    }

    #[test]
    fn find_by_meta_ignores_version_when_needed() {
        let db = MappingDatabase::parse_str(&db_text(), LinePolicy::Abort).unwrap();

        let ps4 = DeviceMeta {
            bus: Some("usb".into()),
            vid: Some(0x054c),
            pid: Some(0x05c4),
            version: Some(0x0100),
            ..Default::default()
        };
        assert_eq!(db.find_by_meta(&ps4).unwrap().name(), "PS4 Controller");

        let xbox = DeviceMeta {
            vid: Some(0x045e),
            pid: Some(0x028e),
            version: Some(0x0110),
            ..Default::default()
        };
        assert_eq!(db.find_by_meta(&xbox).unwrap().name(), "Xbox 360 Controller");

        let unknown = DeviceMeta {
            vid: Some(0x1234),
            pid: Some(0x5678),
            ..Default::default()
        };
        assert!(db.find_by_meta(&unknown).is_none());
    }

    #[test]
    fn find_ignores_crc() {
        let db = MappingDatabase::parse_str(
            "03008fe54c050000c405000000000000,PS4 with CRC,a:b1",
            LinePolicy::Abort,
        )
        .unwrap();
        let id = Uuid::parse_str("030000004c050000c405000000000000").unwrap();
        assert!(db.get(&id).is_none());
        assert_eq!(db.find(&id).unwrap().name(), "PS4 with CRC");
    }

    #[test]
    fn other_platform_lines_are_left_out() {
        let text = format!(
            "030000005e0400008e02000010010000,Here,a:b0,platform:{CURRENT_PLATFORM},\n\
             030000004c050000c405000000000000,Elsewhere,a:b1,platform:Nowhere,\n"
        );
        let mut db = MappingDatabase::new();
        let report = db.load_str(&text, LinePolicy::Abort).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.other_platform, 1);
        assert_eq!(db.iter().next().unwrap().bindings().len(), 1);
    }

    #[test]
    fn name_that_looks_like_platform_field_is_a_name() {
        let text = "030000005e0400008e02000010010000,platform:Nowhere,a:b0\n";
        let mut db = MappingDatabase::new();
        let report = db.load_str(text, LinePolicy::Abort).unwrap();
        assert_eq!(report.loaded, 1);
        assert_eq!(report.other_platform, 0);
        assert_eq!(db.iter().next().unwrap().name(), "platform:Nowhere");

        let line = format!(
            "030000005e0400008e02000010010000,platform:Pad,a:b0,platform:{CURRENT_PLATFORM}"
        );
        assert_eq!(
            select_platform(&line).unwrap(),
            "030000005e0400008e02000010010000,platform:Pad,a:b0"
        );
    }

    #[test]
    fn select_platform_keeps_plain_lines() {
        let line = "030000005e0400008e02000010010000,Pad,a:b0";
        assert!(matches!(select_platform(line), Some(Cow::Borrowed(l)) if l == line));
    }
}
