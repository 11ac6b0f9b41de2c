//! picycle-hid library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does picycle-hid do?
//!
//! A single-board computer configured as a USB keyboard gadget appears to
//! the host it is plugged into as an ordinary keyboard.  This crate writes
//! keyboard reports to the gadget's character device so that text, single
//! keys, chords, and DuckyScript payloads are "typed" on that host.
//!
//! ```text
//! CLI / shell / script file
//!        ↓
//! application::interpreter   DuckyScript lines → encoder calls
//! application::encoder       keys and text → press/release report pairs
//!        ↓  HidDevice + Clock
//! infrastructure::gadget     /dev/hidg0
//! ```

/// Application layer: encoder, interpreter, shell command parsing.
pub mod application;

/// Infrastructure layer: gadget device, clock, config, script library, mocks.
pub mod infrastructure;
