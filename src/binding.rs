//! Binding data model.
//!
//! A mapping line is a list of `target:source` pairs. The *target* is the
//! logical gamepad control ([`TargetDescriptor`]), the *source* is the raw
//! joystick input that feeds it ([`SourceDescriptor`]). Together they form a
//! [`BindingEntry`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical gamepad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    X,
    Y,
    Start,
    Back,
    /// The vendor/guide button (`guide`).
    BigButton,
    LeftShoulder,
    RightShoulder,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    pub const ALL: [Button; 15] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::Start,
        Button::Back,
        Button::BigButton,
        Button::LeftShoulder,
        Button::RightShoulder,
        Button::LeftStick,
        Button::RightStick,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
    ];

    /// SDL mapping key for this button.
    pub fn key(self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::X => "x",
            Button::Y => "y",
            Button::Start => "start",
            Button::Back => "back",
            Button::BigButton => "guide",
            Button::LeftShoulder => "leftshoulder",
            Button::RightShoulder => "rightshoulder",
            Button::LeftStick => "leftstick",
            Button::RightStick => "rightstick",
            Button::DPadUp => "dpup",
            Button::DPadDown => "dpdown",
            Button::DPadLeft => "dpleft",
            Button::DPadRight => "dpright",
        }
    }
}

/// Logical gamepad axes. Triggers are axes too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::LeftX,
        Axis::LeftY,
        Axis::RightX,
        Axis::RightY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
    ];

    /// SDL mapping key for this axis.
    pub fn key(self) -> &'static str {
        match self {
            Axis::LeftX => "leftx",
            Axis::LeftY => "lefty",
            Axis::RightX => "rightx",
            Axis::RightY => "righty",
            Axis::LeftTrigger => "lefttrigger",
            Axis::RightTrigger => "righttrigger",
        }
    }
}

/// Position of a hat (POV / D-pad) as SDL bit flags.
///
/// Up = 1, Right = 2, Down = 4, Left = 8; diagonals are the OR of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HatPosition {
    #[default]
    Centered,
    Up,
    Right,
    UpRight,
    Down,
    DownRight,
    Left,
    UpLeft,
    DownLeft,
}

impl HatPosition {
    /// Maps an SDL hat value to a position.
    ///
    /// Values outside the eight directions (0, 5, 7, 10, 11, >12, negatives)
    /// all map to [`HatPosition::Centered`].
    pub fn from_bits(bits: i32) -> Self {
        match bits {
            1 => HatPosition::Up,
            2 => HatPosition::Right,
            3 => HatPosition::UpRight,
            4 => HatPosition::Down,
            6 => HatPosition::DownRight,
            8 => HatPosition::Left,
            9 => HatPosition::UpLeft,
            12 => HatPosition::DownLeft,
            _ => HatPosition::Centered,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            HatPosition::Centered => 0,
            HatPosition::Up => 1,
            HatPosition::Right => 2,
            HatPosition::UpRight => 3,
            HatPosition::Down => 4,
            HatPosition::DownRight => 6,
            HatPosition::Left => 8,
            HatPosition::UpLeft => 9,
            HatPosition::DownLeft => 12,
        }
    }

    /// `true` if every direction bit of `other` is set in `self`.
    ///
    /// `Centered` has no bits and is never contained.
    pub fn contains(self, other: HatPosition) -> bool {
        let want = other.bits();
        want != 0 && self.bits() & want == want
    }
}

/// The logical control a binding drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetDescriptor {
    Button(Button),
    Axis(Axis),
    /// A key this crate does not model (e.g. `platform`, `misc1`, `paddle1`).
    Unmapped,
}

impl TargetDescriptor {
    /// Resolves an SDL target key. Exact, case-sensitive match; unknown keys
    /// are [`TargetDescriptor::Unmapped`].
    pub fn from_key(key: &str) -> Self {
        match key {
            // Buttons
            "a" => Self::Button(Button::A),
            "b" => Self::Button(Button::B),
            "x" => Self::Button(Button::X),
            "y" => Self::Button(Button::Y),
            "start" => Self::Button(Button::Start),
            "back" => Self::Button(Button::Back),
            "guide" => Self::Button(Button::BigButton),
            "leftshoulder" => Self::Button(Button::LeftShoulder),
            "rightshoulder" => Self::Button(Button::RightShoulder),
            "leftstick" => Self::Button(Button::LeftStick),
            "rightstick" => Self::Button(Button::RightStick),
            "dpup" => Self::Button(Button::DPadUp),
            "dpdown" => Self::Button(Button::DPadDown),
            "dpleft" => Self::Button(Button::DPadLeft),
            "dpright" => Self::Button(Button::DPadRight),

            // Axes
            "leftx" => Self::Axis(Axis::LeftX),
            "lefty" => Self::Axis(Axis::LeftY),
            "rightx" => Self::Axis(Axis::RightX),
            "righty" => Self::Axis(Axis::RightY),

            // Triggers
            "lefttrigger" => Self::Axis(Axis::LeftTrigger),
            "righttrigger" => Self::Axis(Axis::RightTrigger),

            _ => Self::Unmapped,
        }
    }

    /// SDL key, or `None` for unmapped targets.
    pub fn key(self) -> Option<&'static str> {
        match self {
            Self::Button(b) => Some(b.key()),
            Self::Axis(a) => Some(a.key()),
            Self::Unmapped => None,
        }
    }
}

/// The raw joystick input feeding a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceDescriptor {
    /// Joystick axis `a<index>`.
    Axis { index: u32 },
    /// Joystick button `b<index>`.
    Button { index: u32 },
    /// Joystick hat `h<hat>.<position>`.
    Hat { hat: u8, position: HatPosition },
    /// Empty source spec.
    Unmapped,
}

/// Writes the SDL source spec (`a0`, `b3`, `h0.4`); unmapped writes nothing.
impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::Axis { index } => write!(f, "a{index}"),
            SourceDescriptor::Button { index } => write!(f, "b{index}"),
            SourceDescriptor::Hat { hat, position } => write!(f, "h{hat}.{}", position.bits()),
            SourceDescriptor::Unmapped => Ok(()),
        }
    }
}

/// One `target:source` pair from a mapping line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingEntry {
    pub target: TargetDescriptor,
    pub source: SourceDescriptor,
}

impl BindingEntry {
    pub fn new(target: TargetDescriptor, source: SourceDescriptor) -> Self {
        Self { target, source }
    }
}

impl fmt::Display for BindingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target.key().unwrap_or_default(), self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_button_key_resolves_back() {
        for b in Button::ALL {
            assert_eq!(TargetDescriptor::from_key(b.key()), TargetDescriptor::Button(b));
        }
        for a in Axis::ALL {
            assert_eq!(TargetDescriptor::from_key(a.key()), TargetDescriptor::Axis(a));
        }
    }

    #[test]
    fn target_keys_are_case_sensitive() {
        assert_eq!(TargetDescriptor::from_key("A"), TargetDescriptor::Unmapped);
        assert_eq!(TargetDescriptor::from_key("LeftX"), TargetDescriptor::Unmapped);
        assert_eq!(TargetDescriptor::from_key(""), TargetDescriptor::Unmapped);
    }

    #[test]
    fn hat_values_outside_table_are_centered() {
        for v in [0, 5, 7, 10, 11, 13, 255, -1] {
            assert_eq!(HatPosition::from_bits(v), HatPosition::Centered, "value {v}");
        }
        assert_eq!(HatPosition::from_bits(12), HatPosition::DownLeft);
        assert_eq!(HatPosition::from_bits(9), HatPosition::UpLeft);
    }

    #[test]
    fn hat_position_table() {
        let table = [
            (1, HatPosition::Up),
            (2, HatPosition::Right),
            (3, HatPosition::UpRight),
            (4, HatPosition::Down),
            (6, HatPosition::DownRight),
            (8, HatPosition::Left),
            (9, HatPosition::UpLeft),
            (12, HatPosition::DownLeft),
        ];
        for (bits, position) in table {
            assert_eq!(HatPosition::from_bits(bits), position, "value {bits}");
            assert_eq!(i32::from(position.bits()), bits);
        }
    }

    #[test]
    fn hat_contains_uses_bits() {
        assert!(HatPosition::UpRight.contains(HatPosition::Up));
        assert!(HatPosition::UpRight.contains(HatPosition::Right));
        assert!(!HatPosition::UpRight.contains(HatPosition::Down));
        assert!(!HatPosition::Up.contains(HatPosition::UpRight));
        assert!(!HatPosition::Up.contains(HatPosition::Centered));
    }

    #[test]
    fn entry_display() {
        let e = BindingEntry::new(
            TargetDescriptor::Button(Button::DPadUp),
            SourceDescriptor::Hat { hat: 0, position: HatPosition::Up },
        );
        assert_eq!(e.to_string(), "dpup:h0.1");

        let e = BindingEntry::new(TargetDescriptor::Unmapped, SourceDescriptor::Axis { index: 3 });
        assert_eq!(e.to_string(), ":a3");
    }
}
