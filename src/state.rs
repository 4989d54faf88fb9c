//! Logical gamepad state driven through a mapping.
//!
//! [`GamepadState`] holds the last known value of every logical control. Feed
//! it raw [`InputKind`] changes together with the device's [`DeviceMapping`];
//! each binding whose source matches the change updates its target.
//!
//! # Conversions
//! - axis -> axis: value copied.
//! - axis -> button: pressed while the value is above [`BUTTON_THRESHOLD`].
//! - button/hat -> button: pressed state.
//! - button/hat -> axis: `1.0` when active, `0.0` otherwise.
//!
//! A hat binding is active while the hat's position holds every direction bit
//! of the binding's position, so `h0.1` (up) stays active for up-left and
//! up-right. When several sources feed one target, the latest change wins.
//!
//! # Example
//! ```
//! use stickmap::{Button, DeviceMapping, GamepadState, InputKind};
//!
//! let mapping: DeviceMapping = "030000005e0400008e02000010010000,Pad,a:b0,dpup:h0.1"
//!     .parse()
//!     .unwrap();
//! let mut state = GamepadState::default();
//! state.apply(&mapping, &InputKind::ButtonPressed { button: 0 });
//! assert!(state.button(Button::A));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::binding::{Axis, Button, SourceDescriptor, TargetDescriptor};
use crate::event::InputKind;
use crate::mapping::DeviceMapping;

/// Axis value above which an axis-sourced button counts as pressed.
pub const BUTTON_THRESHOLD: f32 = 0.5;

/// Snapshot of logical gamepad controls.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct GamepadState {
    buttons: BTreeSet<Button>,
    axes: HashMap<Axis, f32>,
}

impl GamepadState {
    /// Applies one raw change. Returns `true` if any binding consumed it.
    pub fn apply(&mut self, mapping: &DeviceMapping, input: &InputKind) -> bool {
        let mut matched = false;

        for entry in mapping {
            match (entry.source, *input) {
                (SourceDescriptor::Axis { index }, InputKind::AxisMoved { axis, value })
                    if index == axis =>
                {
                    self.set_analog(entry.target, value);
                }
                (SourceDescriptor::Button { index }, InputKind::ButtonPressed { button })
                    if index == button =>
                {
                    self.set_digital(entry.target, true);
                }
                (SourceDescriptor::Button { index }, InputKind::ButtonReleased { button })
                    if index == button =>
                {
                    self.set_digital(entry.target, false);
                }
                (
                    SourceDescriptor::Hat { hat, position: wanted },
                    InputKind::HatChanged { hat: changed, position },
                ) if hat == changed => {
                    self.set_digital(entry.target, position.contains(wanted));
                }
                _ => continue,
            }
            matched = true;
        }

        matched
    }

    /// Applies a batch of changes in order.
    pub fn apply_all(&mut self, mapping: &DeviceMapping, inputs: &[InputKind]) {
        for input in inputs {
            self.apply(mapping, input);
        }
    }

    /// Gets the state of a button (false if never set).
    pub fn button(&self, button: Button) -> bool {
        self.buttons.contains(&button)
    }

    /// Gets the value of an axis (0.0 if never set).
    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// Currently pressed buttons in declaration order.
    pub fn pressed_buttons(&self) -> impl Iterator<Item = Button> + '_ {
        self.buttons.iter().copied()
    }

    fn set_digital(&mut self, target: TargetDescriptor, on: bool) {
        match target {
            TargetDescriptor::Button(button) => {
                if on {
                    self.buttons.insert(button);
                } else {
                    self.buttons.remove(&button);
                }
            }
            TargetDescriptor::Axis(axis) => {
                self.axes.insert(axis, if on { 1.0 } else { 0.0 });
            }
            TargetDescriptor::Unmapped => {}
        }
    }

    fn set_analog(&mut self, target: TargetDescriptor, value: f32) {
        match target {
            TargetDescriptor::Axis(axis) => {
                self.axes.insert(axis, value);
            }
            TargetDescriptor::Button(_) => self.set_digital(target, value > BUTTON_THRESHOLD),
            TargetDescriptor::Unmapped => {}
        }
    }
}
