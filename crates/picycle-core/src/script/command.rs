//! Parsed script instructions.

use serde::Serialize;
use thiserror::Error;

use crate::keymap::Modifier;

/// One instruction parsed from a single script line.
///
/// Values are transient: built from one line, executed once, dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "argument", rename_all = "snake_case")]
pub enum ScriptCommand {
    /// `STRING <text>`: type the text verbatim.
    TypeText(String),
    /// A line with a single key token, e.g. `ENTER`.
    PressKey { name: String, modifiers: Modifier },
    /// A line with several key/modifier tokens, e.g. `CTRL ALT DELETE`.
    Combo(Vec<String>),
    /// `DELAY <ms>`.
    Delay(u64),
    /// `DEFAULT_DELAY <ms>`: pause inserted after every following line.
    DefaultDelay(u64),
    /// A line starting with `REM` (any case) or `#`.
    Comment,
    /// A keyword that is recognised but intentionally not executed (`REPEAT`).
    Unsupported { keyword: String, argument: String },
}

/// A line that could not be turned into a [`ScriptCommand`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("{keyword} expects a whole number of milliseconds, got {value:?}")]
    InvalidInteger { keyword: String, value: String },
}

/// A parsed line together with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the original text.
    pub number: usize,
    /// The trimmed source text.
    pub source: String,
    pub parsed: Result<ScriptCommand, ScriptError>,
}
