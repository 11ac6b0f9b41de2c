//! The 8-byte boot-protocol keyboard report.
//!
//! # Wire layout
//!
//! ```text
//! Byte 0    : modifier bitmask (see Modifier)
//! Byte 1    : reserved, always 0x00
//! Byte 2    : key usage ID, 0x00 when no key is pressed
//! Bytes 3-7 : further key slots, always 0x00 here
//! ```
//!
//! The gadget driver expects every write to be exactly [`REPORT_LEN`] bytes.
//! Only one key slot is ever used: keystrokes are emitted one at a time as a
//! press report followed by an all-zero release report.

use std::fmt;

use crate::keymap::{HidKeyCode, Modifier};

/// Size in bytes of every keyboard report.
pub const REPORT_LEN: usize = 8;

/// A single keyboard report as written to the gadget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HidReport([u8; REPORT_LEN]);

impl HidReport {
    /// The all-zero "no keys pressed" report.
    pub const RELEASE: HidReport = HidReport([0; REPORT_LEN]);

    /// Builds a press report for `modifier` plus an optional key.
    ///
    /// `key = None` yields a modifier-only report (e.g. tapping GUI alone).
    pub fn press(modifier: Modifier, key: Option<HidKeyCode>) -> Self {
        let mut bytes = [0u8; REPORT_LEN];
        bytes[0] = modifier.bits();
        bytes[2] = key.map_or(0, HidKeyCode::as_u8);
        HidReport(bytes)
    }

    /// Wraps raw bytes, e.g. a report captured from a device.
    pub const fn from_bytes(bytes: [u8; REPORT_LEN]) -> Self {
        HidReport(bytes)
    }

    /// The raw bytes to write to the device.
    pub fn as_bytes(&self) -> &[u8; REPORT_LEN] {
        &self.0
    }

    pub fn modifier(&self) -> Modifier {
        Modifier::from_bits(self.0[0])
    }

    /// The usage ID in the first key slot (0 when empty).
    pub fn keycode(&self) -> u8 {
        self.0[2]
    }

    /// Returns `true` for the all-zero release report.
    pub fn is_release(&self) -> bool {
        self.0 == [0; REPORT_LEN]
    }
}

impl fmt::Display for HidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_report_layout() {
        // Arrange / Act
        let report = HidReport::press(Modifier::CTRL | Modifier::ALT, Some(HidKeyCode::Delete));

        // Assert
        assert_eq!(report.as_bytes(), &[0x05, 0x00, 0x4C, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier(), Modifier::CTRL | Modifier::ALT);
        assert_eq!(report.keycode(), 0x4C);
        assert!(!report.is_release());
    }

    #[test]
    fn test_modifier_only_report_leaves_key_slot_empty() {
        let report = HidReport::press(Modifier::GUI, None);
        assert_eq!(report.as_bytes(), &[0x08, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_release_report_is_all_zero() {
        assert_eq!(HidReport::RELEASE.as_bytes(), &[0u8; REPORT_LEN]);
        assert!(HidReport::RELEASE.is_release());
        assert_eq!(HidReport::default(), HidReport::RELEASE);
    }

    #[test]
    fn test_report_is_always_eight_bytes() {
        assert_eq!(HidReport::press(Modifier::from_bits(0xFF), Some(HidKeyCode::ContextMenu)).as_bytes().len(), 8);
    }

    #[test]
    fn test_display_is_hex_dump() {
        let report = HidReport::press(Modifier::SHIFT, Some(HidKeyCode::KeyA));
        assert_eq!(report.to_string(), "02 00 04 00 00 00 00 00");
    }
}
