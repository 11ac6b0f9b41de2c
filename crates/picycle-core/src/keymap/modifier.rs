//! Modifier bitmask carried in byte 0 of a boot-protocol keyboard report.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bitmask of held modifier keys.
///
/// Bit layout follows the HID boot keyboard report:
///
/// | Bit | Key         |
/// |-----|-------------|
/// | 0   | Left Ctrl   |
/// | 1   | Left Shift  |
/// | 2   | Left Alt    |
/// | 3   | Left GUI    |
/// | 4   | Right Ctrl  |
/// | 5   | Right Shift |
/// | 6   | Right Alt   |
/// | 7   | Right GUI   |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifier(u8);

impl Modifier {
    pub const NONE: Modifier = Modifier(0);
    pub const CTRL: Modifier = Modifier(1 << 0);
    pub const SHIFT: Modifier = Modifier(1 << 1);
    pub const ALT: Modifier = Modifier(1 << 2);
    pub const GUI: Modifier = Modifier(1 << 3);
    pub const RIGHT_CTRL: Modifier = Modifier(1 << 4);
    pub const RIGHT_SHIFT: Modifier = Modifier(1 << 5);
    pub const RIGHT_ALT: Modifier = Modifier(1 << 6);
    pub const RIGHT_GUI: Modifier = Modifier(1 << 7);

    /// Named modifiers in bit order.
    pub const NAMED: &'static [(&'static str, Modifier)] = &[
        ("ctrl", Modifier::CTRL),
        ("shift", Modifier::SHIFT),
        ("alt", Modifier::ALT),
        ("gui", Modifier::GUI),
        ("right_ctrl", Modifier::RIGHT_CTRL),
        ("right_shift", Modifier::RIGHT_SHIFT),
        ("right_alt", Modifier::RIGHT_ALT),
        ("right_gui", Modifier::RIGHT_GUI),
    ];

    /// Wraps a raw bitmask.
    pub const fn from_bits(bits: u8) -> Self {
        Modifier(bits)
    }

    /// Returns the raw bitmask.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Modifier) -> bool {
        self.0 & other.0 == other.0
    }

    /// Looks up a single modifier by its lowercase name (`"ctrl"`, `"right_alt"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, m)| m)
    }

    /// Names of the modifiers set in this mask, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .iter()
            .filter(move |(_, m)| self.contains(*m))
            .map(|(n, _)| *n)
    }
}

impl BitOr for Modifier {
    type Output = Modifier;

    fn bitor(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifier {
    fn bitor_assign(&mut self, rhs: Modifier) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<_> = self.names().collect();
        f.write_str(&names.join("+"))
    }
}
