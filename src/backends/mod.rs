//! Device discovery backends.
//!
//! Backends describe connected controllers as [`DeviceMeta`](crate::metadata::DeviceMeta)
//! records; pair them with a [`MappingDatabase`](crate::database::MappingDatabase)
//! via [`MappingDatabase::find_by_meta`](crate::database::MappingDatabase::find_by_meta).
//!
//! # Feature flags
//! - **`hid`** — enables `hidapi` enumeration (default).
//!
//! Discovery only describes devices; it does not open or read them.

#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub mod hid;

#[cfg(feature = "hid")]
use crate::error::DiscoveryError;
#[cfg(feature = "hid")]
use crate::metadata::DeviceMeta;

/// Unified discovery across enabled backends.
#[cfg(feature = "hid")]
#[cfg_attr(docsrs, doc(cfg(feature = "hid")))]
pub fn probe_devices() -> Result<Vec<DeviceMeta>, DiscoveryError> {
    let api = hidapi::HidApi::new()?;
    Ok(hid::probe_devices(&api))
}
