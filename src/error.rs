//! Error types.
//!
//! Every fallible surface in the crate has its own enum:
//! - [`MappingError`] for decoding a single mapping line,
//! - [`DatabaseError`] for loading many lines from text or files,
//! - [`ConfigError`] for configuration files,
//! - [`DiscoveryError`] for HID enumeration (feature `hid`).

use std::path::PathBuf;

use thiserror::Error;

/// Failure to decode one mapping line.
///
/// A line yields either a full [`DeviceMapping`](crate::mapping::DeviceMapping)
/// or exactly one of these; there is no partial result.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The line was empty (or absent).
    #[error("mapping string is empty")]
    EmptyInput,

    /// Fewer than three non-empty comma-separated segments.
    #[error("mapping string needs GUID, name and at least one binding (got {segments} segment(s))")]
    MalformedInput { segments: usize },

    /// The first segment is not a 128-bit identifier.
    #[error("invalid device GUID {value:?}")]
    InvalidIdentifier {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// A binding token has no `:` between target and source.
    #[error("binding {token:?} is not of the form target:source")]
    MalformedBinding { token: String },

    /// The numeric part of a source spec is not an integer.
    #[error("invalid index in source {spec:?}")]
    IndexParse { spec: String },

    /// The source spec starts with something other than `a`, `b` or `h`.
    #[error("unrecognized source {spec:?}")]
    UnrecognizedSource { spec: String },
}

/// Failure while building a [`MappingDatabase`](crate::database::MappingDatabase).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("failed to read mapping database {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line failed to decode while the policy was [`LinePolicy::Abort`](crate::database::LinePolicy::Abort).
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: MappingError,
    },
}

/// Failure loading a [`StickmapConfig`](crate::config::StickmapConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Failure enumerating HID devices.
#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to initialize HID API")]
    Hid(#[from] hidapi::HidError),
}
