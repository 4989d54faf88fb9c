//! SDL2 game controller mapping decoder.
//!
//! Decodes one line in the `SDL_GameControllerAddMapping` format:
//!
//! ```text
//! <GUID>,<name>,<target>:<source>,<target>:<source>,...
//! ```
//!
//! - `GUID` is the 128-bit joystick identifier (32 hex digits, dashes and
//!   braces accepted).
//! - `name` is kept verbatim.
//! - each `target` is a gamepad control key (`a`, `leftx`, `dpup`, ...),
//!   unknown keys decode to [`TargetDescriptor::Unmapped`].
//! - each `source` is `a<N>` (axis), `b<N>` (button), `h<H>.<P>` (hat) or empty.
//!
//! Decoding is pure and has no shared state; call it from any thread.
//!
//! # Example
//! ```
//! use stickmap::{decode, Button, SourceDescriptor, TargetDescriptor};
//!
//! let m = decode("030000005e0400008e02000010010000,Xbox 360 Controller,a:b0,leftx:a0").unwrap();
//! assert_eq!(m.name(), "Xbox 360 Controller");
//! assert_eq!(m.bindings()[0].target, TargetDescriptor::Button(Button::A));
//! assert_eq!(m.bindings()[0].source, SourceDescriptor::Button { index: 0 });
//! ```

use uuid::Uuid;

use crate::binding::{BindingEntry, HatPosition, SourceDescriptor, TargetDescriptor};
use crate::error::MappingError;
use crate::mapping::DeviceMapping;

const SEPARATOR: char = ',';

/// Decodes one mapping line.
///
/// # Errors
/// See [`MappingError`]. The first failing segment decides the error; nothing
/// is returned for the segments that did decode.
pub fn decode(configuration: &str) -> Result<DeviceMapping, MappingError> {
    if configuration.is_empty() {
        return Err(MappingError::EmptyInput);
    }

    let items: Vec<&str> = configuration
        .split(SEPARATOR)
        .filter(|s| !s.is_empty())
        .collect();

    let (guid, name, tokens) = match items.as_slice() {
        [guid, name, tokens @ ..] if !tokens.is_empty() => (*guid, *name, tokens),
        _ => {
            return Err(MappingError::MalformedInput {
                segments: items.len(),
            })
        }
    };

    let id = Uuid::parse_str(guid).map_err(|source| MappingError::InvalidIdentifier {
        value: guid.to_string(),
        source,
    })?;

    let bindings = tokens
        .iter()
        .map(|token| parse_binding(token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DeviceMapping::new(id, name, bindings))
}

/// Like [`decode`], treating `None` as empty input.
pub fn decode_opt(configuration: Option<&str>) -> Result<DeviceMapping, MappingError> {
    decode(configuration.unwrap_or_default())
}

/// Splits `target:source` on the first `:`.
fn parse_binding(token: &str) -> Result<BindingEntry, MappingError> {
    let (target, source) = token
        .split_once(':')
        .ok_or_else(|| MappingError::MalformedBinding {
            token: token.to_string(),
        })?;

    Ok(BindingEntry::new(
        TargetDescriptor::from_key(target),
        parse_source(source)?,
    ))
}

/// Dispatches on the first character of a source spec.
pub fn parse_source(spec: &str) -> Result<SourceDescriptor, MappingError> {
    match spec.as_bytes().first() {
        None => Ok(SourceDescriptor::Unmapped),
        Some(b'a') => Ok(SourceDescriptor::Axis {
            index: parse_index(spec)?,
        }),
        Some(b'b') => Ok(SourceDescriptor::Button {
            index: parse_index(spec)?,
        }),
        Some(b'h') => {
            let (hat, position) = parse_hat(spec)?;
            Ok(SourceDescriptor::Hat { hat, position })
        }
        Some(_) => Err(MappingError::UnrecognizedSource {
            spec: spec.to_string(),
        }),
    }
}

fn index_error(spec: &str) -> MappingError {
    MappingError::IndexParse {
        spec: spec.to_string(),
    }
}

/// `a#` / `b#`: everything after the leading letter is the index, a
/// non-negative 32-bit signed integer.
fn parse_index(spec: &str) -> Result<u32, MappingError> {
    spec.get(1..)
        .and_then(|digits| digits.parse::<i32>().ok())
        .and_then(|index| u32::try_from(index).ok())
        .ok_or_else(|| index_error(spec))
}

/// `h#.#`: byte 1 is the hat id digit, bytes 3.. the position bit flags.
///
/// The separator at byte 2 is not checked.
fn parse_hat(spec: &str) -> Result<(u8, HatPosition), MappingError> {
    let hat = spec
        .get(1..2)
        .and_then(|digit| digit.parse::<u8>().ok())
        .ok_or_else(|| index_error(spec))?;
    let bits = spec
        .get(3..)
        .and_then(|value| value.parse::<i32>().ok())
        .ok_or_else(|| index_error(spec))?;

    Ok((hat, HatPosition::from_bits(bits)))
}
