//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the key representation written into byte 2 of every keyboard
//! report.  Each key also carries one canonical lowercase name, which is what
//! scripts and the command line refer to.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  These numbers are called *Usage IDs* and all
//! keyboard keys live on usage page 0x07.
//!
//! | Key          | HID Usage ID | Canonical name |
//! |--------------|-------------|----------------|
//! | Letter A     | 0x04        | `a`            |
//! | Enter        | 0x28        | `enter`        |
//! | Minus        | 0x2D        | `-`            |
//! | F5           | 0x3E        | `f5`           |
//!
//! HID codes represent **physical key positions**, not characters.  The host
//! decides which character a position produces from its keyboard layout; the
//! tables in this crate assume a US QWERTY host layout.
//!
//! Modifier keys (Ctrl, Shift, Alt, GUI) are deliberately absent here: in a
//! boot-protocol report they travel as bits in byte 0, see
//! [`Modifier`](super::modifier::Modifier).

use serde::{Deserialize, Serialize};

/// USB HID Usage ID for keyboard keys (page 0x07).
///
/// The numeric value of each variant is its HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum HidKeyCode {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation keys (HID 0x28–0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    // Lock keys
    CapsLock = 0x39,

    // Function keys (HID 0x3A–0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x46–0x52)
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Application key (HID 0x65)
    ContextMenu = 0x65,
}

impl HidKeyCode {
    /// Every key in the table, in ascending usage-ID order.
    pub const ALL: &'static [HidKeyCode] = &[
        HidKeyCode::KeyA,
        HidKeyCode::KeyB,
        HidKeyCode::KeyC,
        HidKeyCode::KeyD,
        HidKeyCode::KeyE,
        HidKeyCode::KeyF,
        HidKeyCode::KeyG,
        HidKeyCode::KeyH,
        HidKeyCode::KeyI,
        HidKeyCode::KeyJ,
        HidKeyCode::KeyK,
        HidKeyCode::KeyL,
        HidKeyCode::KeyM,
        HidKeyCode::KeyN,
        HidKeyCode::KeyO,
        HidKeyCode::KeyP,
        HidKeyCode::KeyQ,
        HidKeyCode::KeyR,
        HidKeyCode::KeyS,
        HidKeyCode::KeyT,
        HidKeyCode::KeyU,
        HidKeyCode::KeyV,
        HidKeyCode::KeyW,
        HidKeyCode::KeyX,
        HidKeyCode::KeyY,
        HidKeyCode::KeyZ,
        HidKeyCode::Digit1,
        HidKeyCode::Digit2,
        HidKeyCode::Digit3,
        HidKeyCode::Digit4,
        HidKeyCode::Digit5,
        HidKeyCode::Digit6,
        HidKeyCode::Digit7,
        HidKeyCode::Digit8,
        HidKeyCode::Digit9,
        HidKeyCode::Digit0,
        HidKeyCode::Enter,
        HidKeyCode::Escape,
        HidKeyCode::Backspace,
        HidKeyCode::Tab,
        HidKeyCode::Space,
        HidKeyCode::Minus,
        HidKeyCode::Equal,
        HidKeyCode::BracketLeft,
        HidKeyCode::BracketRight,
        HidKeyCode::Backslash,
        HidKeyCode::Semicolon,
        HidKeyCode::Quote,
        HidKeyCode::Backquote,
        HidKeyCode::Comma,
        HidKeyCode::Period,
        HidKeyCode::Slash,
        HidKeyCode::CapsLock,
        HidKeyCode::F1,
        HidKeyCode::F2,
        HidKeyCode::F3,
        HidKeyCode::F4,
        HidKeyCode::F5,
        HidKeyCode::F6,
        HidKeyCode::F7,
        HidKeyCode::F8,
        HidKeyCode::F9,
        HidKeyCode::F10,
        HidKeyCode::F11,
        HidKeyCode::F12,
        HidKeyCode::PrintScreen,
        HidKeyCode::ScrollLock,
        HidKeyCode::Pause,
        HidKeyCode::Insert,
        HidKeyCode::Home,
        HidKeyCode::PageUp,
        HidKeyCode::Delete,
        HidKeyCode::End,
        HidKeyCode::PageDown,
        HidKeyCode::ArrowRight,
        HidKeyCode::ArrowLeft,
        HidKeyCode::ArrowDown,
        HidKeyCode::ArrowUp,
        HidKeyCode::ContextMenu,
    ];

    /// Converts a raw HID Usage ID to a [`HidKeyCode`].
    ///
    /// Returns `None` if the value is not in the table.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.as_u8() == value)
    }

    /// Returns the raw USB HID Usage ID value for this key code.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the canonical lowercase name of this key.
    ///
    /// [`HidKeyCode::from_name`] is the exact inverse of this function.
    pub fn name(self) -> &'static str {
        match self {
            HidKeyCode::KeyA => "a",
            HidKeyCode::KeyB => "b",
            HidKeyCode::KeyC => "c",
            HidKeyCode::KeyD => "d",
            HidKeyCode::KeyE => "e",
            HidKeyCode::KeyF => "f",
            HidKeyCode::KeyG => "g",
            HidKeyCode::KeyH => "h",
            HidKeyCode::KeyI => "i",
            HidKeyCode::KeyJ => "j",
            HidKeyCode::KeyK => "k",
            HidKeyCode::KeyL => "l",
            HidKeyCode::KeyM => "m",
            HidKeyCode::KeyN => "n",
            HidKeyCode::KeyO => "o",
            HidKeyCode::KeyP => "p",
            HidKeyCode::KeyQ => "q",
            HidKeyCode::KeyR => "r",
            HidKeyCode::KeyS => "s",
            HidKeyCode::KeyT => "t",
            HidKeyCode::KeyU => "u",
            HidKeyCode::KeyV => "v",
            HidKeyCode::KeyW => "w",
            HidKeyCode::KeyX => "x",
            HidKeyCode::KeyY => "y",
            HidKeyCode::KeyZ => "z",
            HidKeyCode::Digit1 => "1",
            HidKeyCode::Digit2 => "2",
            HidKeyCode::Digit3 => "3",
            HidKeyCode::Digit4 => "4",
            HidKeyCode::Digit5 => "5",
            HidKeyCode::Digit6 => "6",
            HidKeyCode::Digit7 => "7",
            HidKeyCode::Digit8 => "8",
            HidKeyCode::Digit9 => "9",
            HidKeyCode::Digit0 => "0",
            HidKeyCode::Enter => "enter",
            HidKeyCode::Escape => "esc",
            HidKeyCode::Backspace => "backspace",
            HidKeyCode::Tab => "tab",
            HidKeyCode::Space => "space",
            HidKeyCode::Minus => "-",
            HidKeyCode::Equal => "=",
            HidKeyCode::BracketLeft => "[",
            HidKeyCode::BracketRight => "]",
            HidKeyCode::Backslash => "\\",
            HidKeyCode::Semicolon => ";",
            HidKeyCode::Quote => "'",
            HidKeyCode::Backquote => "`",
            HidKeyCode::Comma => ",",
            HidKeyCode::Period => ".",
            HidKeyCode::Slash => "/",
            HidKeyCode::CapsLock => "caps",
            HidKeyCode::F1 => "f1",
            HidKeyCode::F2 => "f2",
            HidKeyCode::F3 => "f3",
            HidKeyCode::F4 => "f4",
            HidKeyCode::F5 => "f5",
            HidKeyCode::F6 => "f6",
            HidKeyCode::F7 => "f7",
            HidKeyCode::F8 => "f8",
            HidKeyCode::F9 => "f9",
            HidKeyCode::F10 => "f10",
            HidKeyCode::F11 => "f11",
            HidKeyCode::F12 => "f12",
            HidKeyCode::PrintScreen => "print",
            HidKeyCode::ScrollLock => "scroll",
            HidKeyCode::Pause => "pause",
            HidKeyCode::Insert => "insert",
            HidKeyCode::Home => "home",
            HidKeyCode::PageUp => "pageup",
            HidKeyCode::Delete => "delete",
            HidKeyCode::End => "end",
            HidKeyCode::PageDown => "pagedown",
            HidKeyCode::ArrowRight => "right",
            HidKeyCode::ArrowLeft => "left",
            HidKeyCode::ArrowDown => "down",
            HidKeyCode::ArrowUp => "up",
            HidKeyCode::ContextMenu => "app",
        }
    }

    /// Looks up a key by its canonical lowercase name.
    ///
    /// The match is exact: callers lowercase user input first.
    pub fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "a" => HidKeyCode::KeyA,
            "b" => HidKeyCode::KeyB,
            "c" => HidKeyCode::KeyC,
            "d" => HidKeyCode::KeyD,
            "e" => HidKeyCode::KeyE,
            "f" => HidKeyCode::KeyF,
            "g" => HidKeyCode::KeyG,
            "h" => HidKeyCode::KeyH,
            "i" => HidKeyCode::KeyI,
            "j" => HidKeyCode::KeyJ,
            "k" => HidKeyCode::KeyK,
            "l" => HidKeyCode::KeyL,
            "m" => HidKeyCode::KeyM,
            "n" => HidKeyCode::KeyN,
            "o" => HidKeyCode::KeyO,
            "p" => HidKeyCode::KeyP,
            "q" => HidKeyCode::KeyQ,
            "r" => HidKeyCode::KeyR,
            "s" => HidKeyCode::KeyS,
            "t" => HidKeyCode::KeyT,
            "u" => HidKeyCode::KeyU,
            "v" => HidKeyCode::KeyV,
            "w" => HidKeyCode::KeyW,
            "x" => HidKeyCode::KeyX,
            "y" => HidKeyCode::KeyY,
            "z" => HidKeyCode::KeyZ,
            "1" => HidKeyCode::Digit1,
            "2" => HidKeyCode::Digit2,
            "3" => HidKeyCode::Digit3,
            "4" => HidKeyCode::Digit4,
            "5" => HidKeyCode::Digit5,
            "6" => HidKeyCode::Digit6,
            "7" => HidKeyCode::Digit7,
            "8" => HidKeyCode::Digit8,
            "9" => HidKeyCode::Digit9,
            "0" => HidKeyCode::Digit0,
            "enter" => HidKeyCode::Enter,
            "esc" => HidKeyCode::Escape,
            "backspace" => HidKeyCode::Backspace,
            "tab" => HidKeyCode::Tab,
            "space" => HidKeyCode::Space,
            "-" => HidKeyCode::Minus,
            "=" => HidKeyCode::Equal,
            "[" => HidKeyCode::BracketLeft,
            "]" => HidKeyCode::BracketRight,
            "\\" => HidKeyCode::Backslash,
            ";" => HidKeyCode::Semicolon,
            "'" => HidKeyCode::Quote,
            "`" => HidKeyCode::Backquote,
            "," => HidKeyCode::Comma,
            "." => HidKeyCode::Period,
            "/" => HidKeyCode::Slash,
            "caps" => HidKeyCode::CapsLock,
            "f1" => HidKeyCode::F1,
            "f2" => HidKeyCode::F2,
            "f3" => HidKeyCode::F3,
            "f4" => HidKeyCode::F4,
            "f5" => HidKeyCode::F5,
            "f6" => HidKeyCode::F6,
            "f7" => HidKeyCode::F7,
            "f8" => HidKeyCode::F8,
            "f9" => HidKeyCode::F9,
            "f10" => HidKeyCode::F10,
            "f11" => HidKeyCode::F11,
            "f12" => HidKeyCode::F12,
            "print" => HidKeyCode::PrintScreen,
            "scroll" => HidKeyCode::ScrollLock,
            "pause" => HidKeyCode::Pause,
            "insert" => HidKeyCode::Insert,
            "home" => HidKeyCode::Home,
            "pageup" => HidKeyCode::PageUp,
            "delete" => HidKeyCode::Delete,
            "end" => HidKeyCode::End,
            "pagedown" => HidKeyCode::PageDown,
            "right" => HidKeyCode::ArrowRight,
            "left" => HidKeyCode::ArrowLeft,
            "down" => HidKeyCode::ArrowDown,
            "up" => HidKeyCode::ArrowUp,
            "app" => HidKeyCode::ContextMenu,
            _ => return None,
        };
        Some(code)
    }
}
