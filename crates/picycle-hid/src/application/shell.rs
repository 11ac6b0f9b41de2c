//! Line commands accepted by the interactive shell.

use std::str::FromStr;

use picycle_core::keymap::ducky;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  type <text>          type text verbatim
  key <name>           press one key (enter, esc, f5, a, ...)
  combo <tokens...>    press keys together (combo ctrl alt delete)
  ducky <file|script>  run a DuckyScript file or a saved script
  test                 write one empty report to the device
  help                 show this help
  quit | exit          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Type(String),
    Key(String),
    Combo(Vec<String>),
    Ducky(String),
    Test,
    Help,
    Quit,
    /// Blank input.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("unknown command {0:?}; type `help` for a list")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    /// Splits off the first word as the command.  For `type` the rest of
    /// the line is kept as written after one separating space.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim_end_matches(['\r', '\n']);
        let trimmed = input.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(ShellCommand::Empty);
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((w, r)) => (w, r),
            None => (trimmed, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "type" => {
                if rest.is_empty() {
                    return Err(ShellError::MissingArgument("type"));
                }
                Ok(ShellCommand::Type(rest.to_string()))
            }
            "key" => match rest.trim() {
                "" => Err(ShellError::MissingArgument("key")),
                name => Ok(ShellCommand::Key(ducky::canonical_name(name))),
            },
            "combo" => {
                let tokens: Vec<String> = rest.split_whitespace().map(ducky::canonical_name).collect();
                if tokens.is_empty() {
                    return Err(ShellError::MissingArgument("combo"));
                }
                Ok(ShellCommand::Combo(tokens))
            }
            "ducky" => match rest.trim() {
                "" => Err(ShellError::MissingArgument("ducky")),
                target => Ok(ShellCommand::Ducky(target.to_string())),
            },
            "test" => Ok(ShellCommand::Test),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keeps_text_verbatim() {
        assert_eq!(
            "type Hello,  World! ".parse::<ShellCommand>(),
            Ok(ShellCommand::Type("Hello,  World! ".to_string()))
        );
    }

    #[test]
    fn test_key_uses_ducky_aliases() {
        assert_eq!("key ESCAPE".parse::<ShellCommand>(), Ok(ShellCommand::Key("esc".to_string())));
        assert_eq!("KEY f5".parse::<ShellCommand>(), Ok(ShellCommand::Key("f5".to_string())));
    }

    #[test]
    fn test_combo_splits_tokens() {
        assert_eq!(
            "combo CTRL alt Delete".parse::<ShellCommand>(),
            Ok(ShellCommand::Combo(vec![
                "ctrl".to_string(),
                "alt".to_string(),
                "delete".to_string()
            ]))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!("test".parse::<ShellCommand>(), Ok(ShellCommand::Test));
        assert_eq!("help".parse::<ShellCommand>(), Ok(ShellCommand::Help));
        assert_eq!("quit".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
        assert_eq!("exit\n".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
        assert_eq!("   ".parse::<ShellCommand>(), Ok(ShellCommand::Empty));
        assert_eq!(
            "ducky payload.txt".parse::<ShellCommand>(),
            Ok(ShellCommand::Ducky("payload.txt".to_string()))
        );
    }

    #[test]
    fn test_missing_argument_and_unknown_command() {
        assert_eq!(
            "key".parse::<ShellCommand>(),
            Err(ShellError::MissingArgument("key"))
        );
        assert_eq!(
            "combo   ".parse::<ShellCommand>(),
            Err(ShellError::MissingArgument("combo"))
        );
        assert_eq!(
            "dance".parse::<ShellCommand>(),
            Err(ShellError::UnknownCommand("dance".to_string()))
        );
    }
}
