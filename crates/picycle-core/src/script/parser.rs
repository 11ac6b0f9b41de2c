//! Line classifier for the DuckyScript subset.
//!
//! Parsing never touches a device: it turns text into [`ScriptCommand`]s
//! that the interpreter in `picycle-hid` executes.

use tracing::trace;

use super::command::{ScriptCommand, ScriptError, ScriptLine};
use crate::keymap::{ducky, Modifier};

/// Classifies one line of script text.
///
/// Returns `None` for blank lines.  The keyword is case-insensitive; the
/// argument of `STRING` is kept exactly as written after the separating
/// whitespace.
pub fn parse_line(line: &str) -> Option<Result<ScriptCommand, ScriptError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    // `REM` is matched as a prefix, so `REMARK` and `REM:` lines are comments too.
    let is_rem = line.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("REM"));
    if line.starts_with('#') || is_rem {
        return Some(Ok(ScriptCommand::Comment));
    }

    let (keyword, argument) = match line.split_once(char::is_whitespace) {
        Some((k, rest)) => (k, rest.trim_start()),
        None => (line, ""),
    };
    let upper = keyword.to_ascii_uppercase();

    let command = match upper.as_str() {
        "STRING" => Ok(ScriptCommand::TypeText(argument.to_string())),
        "DELAY" => parse_millis(&upper, argument).map(ScriptCommand::Delay),
        "DEFAULT_DELAY" | "DEFAULTDELAY" => {
            parse_millis(&upper, argument).map(ScriptCommand::DefaultDelay)
        }
        "REPEAT" => Ok(ScriptCommand::Unsupported {
            keyword: upper.clone(),
            argument: argument.to_string(),
        }),
        _ => Ok(key_line(line)),
    };
    Some(command)
}

/// Parses a whole script, skipping blank lines.
///
/// Both `\n` and `\r\n` separate lines; text without a separator is a
/// single line.
pub fn parse_script(text: &str) -> Vec<ScriptLine> {
    let lines: Vec<ScriptLine> = text
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            parse_line(raw).map(|parsed| ScriptLine {
                number: idx + 1,
                source: raw.trim().to_string(),
                parsed,
            })
        })
        .collect();
    trace!(lines = lines.len(), "parsed script");
    lines
}

fn key_line(line: &str) -> ScriptCommand {
    let mut names: Vec<String> = line.split_whitespace().map(ducky::canonical_name).collect();
    if names.len() == 1 {
        ScriptCommand::PressKey {
            name: names.remove(0),
            modifiers: Modifier::NONE,
        }
    } else {
        ScriptCommand::Combo(names)
    }
}

fn parse_millis(keyword: &str, argument: &str) -> Result<u64, ScriptError> {
    argument
        .parse::<u64>()
        .map_err(|_| ScriptError::InvalidInteger {
            keyword: keyword.to_string(),
            value: argument.to_string(),
        })
}
