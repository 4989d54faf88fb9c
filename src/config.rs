//! Loader configuration.
//!
//! A [`StickmapConfig`] lists the mapping database files to load, extra inline
//! mapping lines, and the [`LinePolicy`] for bad lines. It is read from TOML
//! (or JSON when the file ends in `.json`):
//!
//! ```toml
//! databases = ["gamecontrollerdb.txt", "local.txt"]
//! on_error = "skip"
//! mappings = [
//!     "030000005e0400008e02000010010000,My Pad,a:b0,b:b1,",
//! ]
//! ```
//!
//! Files load in order, inline mappings last, so later entries override
//! earlier ones with the same GUID.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::database::{LinePolicy, MappingDatabase};
use crate::error::{ConfigError, DatabaseError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StickmapConfig {
    /// Mapping database files, loaded in order.
    pub databases: Vec<PathBuf>,
    /// Inline mapping lines, loaded after the files.
    pub mappings: Vec<String>,
    /// Policy for lines that fail to decode.
    pub on_error: LinePolicy,
}

impl StickmapConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a config file. `.json` files are JSON, anything else TOML.
    ///
    /// Relative database paths are resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let mut config = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_toml_str(&text)?
        };

        if let Some(dir) = path.parent() {
            for db in &mut config.databases {
                if db.is_relative() {
                    *db = dir.join(&*db);
                }
            }
        }

        Ok(config)
    }

    /// Loads every configured database, then the inline mappings.
    pub fn build_database(&self) -> Result<MappingDatabase, DatabaseError> {
        let mut db = MappingDatabase::new();
        for path in &self.databases {
            db.load_file(path, self.on_error)?;
        }
        if !self.mappings.is_empty() {
            db.load_str(&self.mappings.join("\n"), self.on_error)?;
        }
        log::debug!("mapping database ready with {} device(s)", db.len());
        Ok(db)
    }
}
