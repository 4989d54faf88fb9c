//! Raw joystick input changes.
//!
//! Backends report device-local changes as [`InputKind`] deltas. A
//! [`GamepadState`](crate::state::GamepadState) turns them into logical gamepad
//! controls through a [`DeviceMapping`](crate::mapping::DeviceMapping).
//!
//! ## Value conventions
//! - **Axes:** normalized to `[-1.0, 1.0]`; triggers usually rest at `-1.0` or `0.0`
//!   depending on the device.
//! - **Buttons:** press/release edges.
//! - **Hats:** SDL bit-flag positions ([`HatPosition`]).

use crate::binding::HatPosition;

/// Per-device input change (delta).
///
/// `axis`/`button`/`hat` are the raw indices referenced by `a#`, `b#` and `h#.#`
/// sources in a mapping line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputKind {
    /// A continuous channel changed.
    AxisMoved { axis: u32, value: f32 },

    /// A button transitioned to pressed.
    ButtonPressed { button: u32 },

    /// A button transitioned to released.
    ButtonReleased { button: u32 },

    /// A hat (POV/D-pad) changed.
    HatChanged { hat: u8, position: HatPosition },
}
