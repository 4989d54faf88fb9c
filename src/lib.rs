//! StickMap — SDL2 gamepad mappings for Rust.
//!
//! Decodes `SDL_GameControllerAddMapping` strings into structured mappings,
//! keeps them in a GUID-indexed database, matches discovered devices to their
//! mapping, and applies a mapping to raw joystick input.
//!
//! ```
//! use stickmap::{decode, Axis, TargetDescriptor};
//!
//! let m = decode("030000005e0400008e02000010010000,Pad,leftx:a0,zzz:b4").unwrap();
//! assert_eq!(m.bindings()[0].target, TargetDescriptor::Axis(Axis::LeftX));
//! assert_eq!(m.bindings()[1].target, TargetDescriptor::Unmapped);
//! ```

pub mod backends;
pub mod binding;
pub mod config;
pub mod database;
pub mod decoder;
pub mod error;
pub mod event;
pub mod mapping;
pub mod metadata;
pub mod state;

pub use binding::*;
pub use config::StickmapConfig;
pub use database::{LinePolicy, MappingDatabase};
pub use decoder::{decode, decode_opt};
pub use error::*;
pub use event::*;
pub use mapping::DeviceMapping;
pub use metadata::DeviceMeta;
pub use state::GamepadState;
