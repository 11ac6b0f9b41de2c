//! # picycle-core
//!
//! Shared library for the PiCycle USB keyboard gadget containing the keycode
//! tables, the 8-byte HID report format, and the DuckyScript parser.
//!
//! It has zero dependencies on devices, clocks, or the file system, so
//! everything here can be tested on any machine.
//!
//! # Architecture overview (for beginners)
//!
//! A Raspberry Pi configured as a USB gadget can pretend to be a keyboard.
//! The kernel exposes the fake keyboard as a character device (`/dev/hidg0`);
//! every 8 bytes written to it arrive at the host as one keyboard report.
//!
//! This crate defines what those bytes mean:
//!
//! - **`keymap`** – Names and characters to USB HID usage IDs, the modifier
//!   bitmask, and DuckyScript key aliases.
//!
//! - **`report`** – The 8-byte report itself (`HidReport`).
//!
//! - **`script`** – Turns DuckyScript text into `ScriptCommand` values without
//!   executing anything.
//!
//! The `picycle-hid` crate owns the device and the clock and executes the
//! commands.

pub mod keymap;
pub mod report;
pub mod script;

pub use keymap::{HidKeyCode, KeyMapper, KeymapError, Modifier};
pub use report::{HidReport, REPORT_LEN};
pub use script::{parse_line, parse_script, ScriptCommand, ScriptError, ScriptLine};
