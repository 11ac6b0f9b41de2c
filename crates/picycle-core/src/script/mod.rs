//! DuckyScript subset: command types and the line parser.
//!
//! ```text
//! STRING <literal text>        type literal text
//! DELAY <milliseconds>         pause
//! DEFAULT_DELAY <milliseconds> pause after every following line
//! <KEY> [<KEY> ...]            single key or space-separated combo
//! REM comment / # comment      ignored
//! REPEAT <n>                   recognised, no effect
//! ```

pub mod command;
pub mod parser;

pub use command::{ScriptCommand, ScriptError, ScriptLine};
pub use parser::{parse_line, parse_script};
