//! picycle-hid: types text and runs DuckyScript through a USB keyboard gadget.
//!
//! # Usage
//!
//! ```text
//! picycle-hid [OPTIONS] <TEXT>...          type the arguments, joined by spaces
//! picycle-hid [OPTIONS] <COMMAND>
//!
//! Commands:
//!   type <TEXT>...      type text verbatim
//!   key <NAME>          press and release one key
//!   combo <TOKEN>...    press keys together (ctrl alt delete)
//!   ducky <FILE>        run a DuckyScript file (`-` reads stdin)
//!   run <SCRIPT>        run a script from the library
//!   check <FILE>        parse a script and print its commands as JSON
//!   scripts <ACTION>    list, show, save, or delete library scripts
//!   shell               interactive mode (also the default with no arguments)
//!
//! Options:
//!   --config <PATH>     config file [env: PICYCLE_CONFIG] [default: /etc/picycle/config.toml]
//!   --device <PATH>     HID gadget device [env: PICYCLE_DEVICE]
//! ```
//!
//! Logging goes to stderr.  `RUST_LOG` takes precedence over the configured
//! `log_level`.  Ctrl-C stops the current operation between keystrokes.

use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use picycle_core::keymap::ducky;
use picycle_core::{parse_script, ScriptCommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use picycle_hid::application::shell::HELP;
use picycle_hid::application::{
    Clock, ComboOutcome, DuckyInterpreter, ExecutionReport, HidDevice, ReportEncoder, ShellCommand,
    TypeOutcome,
};
use picycle_hid::infrastructure::storage::config::{load_config, AppConfig, DEFAULT_CONFIG_PATH};
use picycle_hid::infrastructure::storage::scripts::ScriptLibrary;
use picycle_hid::infrastructure::{HidGadget, SystemClock};

type Encoder = ReportEncoder<HidGadget, SystemClock>;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Keystroke injector for a Linux USB HID keyboard gadget.
#[derive(Debug, Parser)]
#[command(name = "picycle-hid", version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, env = "PICYCLE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// HID gadget device; overrides the config file.
    #[arg(long, global = true, env = "PICYCLE_DEVICE")]
    device: Option<PathBuf>,

    /// Text to type when no command is given.
    #[arg(allow_hyphen_values = true)]
    text: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Type text verbatim.
    Type {
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Press and release a single key.
    Key { name: String },
    /// Press several keys at once.
    Combo {
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Run a DuckyScript file; `-` reads stdin.
    Ducky {
        file: PathBuf,
        /// Print the execution report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a script from the library.
    Run {
        script: String,
        #[arg(long)]
        json: bool,
    },
    /// Parse a script without touching the device.
    Check { file: PathBuf },
    /// Manage the script library.
    Scripts {
        #[command(subcommand)]
        action: ScriptsAction,
    },
    /// Interactive shell.
    Shell,
}

#[derive(Debug, Subcommand)]
enum ScriptsAction {
    List,
    Show { name: String },
    /// Store FILE (or stdin with `-`) under NAME.
    Save { name: String, file: PathBuf },
    Delete { name: String },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(device) = &cli.device {
        config.device.path = device.clone();
    }
    init_tracing(&config.log_level);

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("received Ctrl-C; stopping after the current keystroke");
        flag.store(false, Ordering::SeqCst);
    })
    .context("installing Ctrl-C handler")?;

    let library = ScriptLibrary::new(&config.scripts.directory);

    match cli.command {
        None if cli.text.is_empty() => {
            run_shell(&mut open_encoder(&config, &running)?, &library, &running)
        }
        None => type_words(&mut open_encoder(&config, &running)?, &cli.text),
        Some(Command::Shell) => run_shell(&mut open_encoder(&config, &running)?, &library, &running),
        Some(Command::Check { file }) => check(&file),
        Some(Command::Scripts { action }) => manage_scripts(&library, action),
        Some(Command::Type { text }) => type_words(&mut open_encoder(&config, &running)?, &text),
        Some(Command::Key { name }) => press_named(&mut open_encoder(&config, &running)?, &name),
        Some(Command::Combo { tokens }) => {
            press_combo(&mut open_encoder(&config, &running)?, &tokens).map(drop)
        }
        Some(Command::Ducky { file, json }) => {
            let source = read_source(&file)?;
            run_script(&mut open_encoder(&config, &running)?, &source, json)
        }
        Some(Command::Run { script, json }) => {
            let source = library.load(&script)?;
            run_script(&mut open_encoder(&config, &running)?, &source, json)
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_encoder(config: &AppConfig, running: &Arc<AtomicBool>) -> anyhow::Result<Encoder> {
    let gadget = HidGadget::open(&config.device.path).context("cannot open HID gadget")?;
    Ok(ReportEncoder::new(gadget, SystemClock)
        .with_timing(config.timing.into())
        .with_running_flag(Arc::clone(running)))
}

// ── One-shot commands ─────────────────────────────────────────────────────────

fn type_words(encoder: &mut Encoder, words: &[String]) -> anyhow::Result<()> {
    let outcome = encoder.type_text(&words.join(" "))?;
    report_typed(&outcome);
    Ok(())
}

/// Taps one key named the way the shell and scripts name it (`ESCAPE`, `WINDOWS`).
fn press_named<D: HidDevice, C: Clock>(
    encoder: &mut ReportEncoder<D, C>,
    name: &str,
) -> anyhow::Result<()> {
    encoder.tap(&ducky::canonical_name(name))?;
    Ok(())
}

fn press_combo<D: HidDevice, C: Clock>(
    encoder: &mut ReportEncoder<D, C>,
    tokens: &[String],
) -> anyhow::Result<ComboOutcome> {
    let tokens: Vec<String> = tokens.iter().map(|t| ducky::canonical_name(t)).collect();
    let outcome = encoder.combo(&tokens)?;
    if !outcome.unknown.is_empty() {
        eprintln!("skipped unknown keys: {}", outcome.unknown.join(", "));
    }
    Ok(outcome)
}

fn run_script(encoder: &mut Encoder, source: &str, json: bool) -> anyhow::Result<()> {
    match DuckyInterpreter::new(encoder).run(source) {
        Ok(report) => {
            print_report(&report, json)?;
            Ok(())
        }
        Err(err) => {
            print_report(&err.partial, json)?;
            Err(err.into())
        }
    }
}

fn print_report(report: &ExecutionReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if !report.is_clean() {
        eprintln!(
            "{} lines executed, {} skipped; see log for details",
            report.lines.len(),
            report.skipped()
        );
    }
    Ok(())
}

fn report_typed(outcome: &TypeOutcome) {
    if !outcome.skipped.is_empty() {
        let skipped: String = outcome.skipped.iter().collect();
        eprintln!("skipped characters with no key: {skipped:?}");
    }
}

/// One line of `check` output.
#[derive(Debug, Serialize)]
struct CheckedLine<'a> {
    line: usize,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a ScriptCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn check(file: &Path) -> anyhow::Result<()> {
    let source = read_source(file)?;
    let lines = parse_script(&source);
    let checked: Vec<CheckedLine<'_>> = lines
        .iter()
        .map(|l| CheckedLine {
            line: l.number,
            source: &l.source,
            command: l.parsed.as_ref().ok(),
            error: l.parsed.as_ref().err().map(ToString::to_string),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&checked)?);

    let invalid = checked.iter().filter(|c| c.error.is_some()).count();
    if invalid > 0 {
        bail!("{invalid} line(s) failed to parse");
    }
    Ok(())
}

fn manage_scripts(library: &ScriptLibrary, action: ScriptsAction) -> anyhow::Result<()> {
    match action {
        ScriptsAction::List => {
            for entry in library.list()? {
                println!("{:<40} {:>8}", entry.name, entry.size);
            }
        }
        ScriptsAction::Show { name } => print!("{}", library.load(&name)?),
        ScriptsAction::Save { name, file } => {
            let content = read_source(&file)?;
            let stored = library.save(&name, &content)?;
            println!("saved {stored}");
        }
        ScriptsAction::Delete { name } => library.delete(&name)?,
    }
    Ok(())
}

/// Reads a file, or stdin when `path` is `-`.
fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading script from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

// ── Interactive shell ─────────────────────────────────────────────────────────

fn run_shell(
    encoder: &mut Encoder,
    library: &ScriptLibrary,
    running: &AtomicBool,
) -> anyhow::Result<()> {
    println!("{HELP}");
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("picycle> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        running.store(true, Ordering::SeqCst);

        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let result = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            ShellCommand::Test => encoder
                .release_all()
                .map(|()| println!("device accepted a report"))
                .map_err(anyhow::Error::from),
            ShellCommand::Type(text) => encoder
                .type_text(&text)
                .map(|outcome| report_typed(&outcome))
                .map_err(anyhow::Error::from),
            ShellCommand::Key(name) => encoder.tap(&name).map(drop).map_err(anyhow::Error::from),
            ShellCommand::Combo(tokens) => encoder.combo(&tokens).map(drop).map_err(anyhow::Error::from),
            ShellCommand::Ducky(target) => shell_source(library, &target)
                .and_then(|source| run_script(encoder, &source, false)),
        };

        if let Err(e) = result {
            warn!(error = %e, "shell command failed");
            eprintln!("error: {e:#}");
        }
    }
    Ok(())
}

/// A path on disk wins over a library script of the same name.
fn shell_source(library: &ScriptLibrary, target: &str) -> anyhow::Result<String> {
    let path = Path::new(target);
    if path.is_file() {
        return read_source(path);
    }
    Ok(library.load(target)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use picycle_hid::infrastructure::mock::Recording;

    #[test]
    fn test_bare_words_are_direct_type_text() {
        // Arrange / Act
        let cli = Cli::parse_from(["picycle-hid", "hello", "world"]);

        // Assert
        assert!(cli.command.is_none());
        assert_eq!(cli.text, vec!["hello", "world"]);
    }

    #[test]
    fn test_no_arguments_has_no_text_and_no_command() {
        let cli = Cli::parse_from(["picycle-hid"]);
        assert!(cli.command.is_none());
        assert!(cli.text.is_empty());
    }

    #[test]
    fn test_device_override() {
        let cli = Cli::parse_from(["picycle-hid", "--device", "/dev/hidg1", "key", "enter"]);
        assert_eq!(cli.device, Some(PathBuf::from("/dev/hidg1")));
        assert!(matches!(cli.command, Some(Command::Key { ref name }) if name == "enter"));
    }

    #[test]
    fn test_config_option_after_subcommand() {
        let cli = Cli::parse_from(["picycle-hid", "shell", "--config", "/tmp/p.toml"]);
        assert_eq!(cli.config, PathBuf::from("/tmp/p.toml"));
        assert!(matches!(cli.command, Some(Command::Shell)));
    }

    #[test]
    fn test_combo_collects_tokens() {
        let cli = Cli::parse_from(["picycle-hid", "combo", "ctrl", "alt", "delete"]);
        match cli.command {
            Some(Command::Combo { tokens }) => assert_eq!(tokens, vec!["ctrl", "alt", "delete"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ducky_json_flag_and_stdin() {
        let cli = Cli::parse_from(["picycle-hid", "ducky", "-", "--json"]);
        match cli.command {
            Some(Command::Ducky { file, json }) => {
                assert_eq!(file, PathBuf::from("-"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_scripts_save_subcommand() {
        let cli = Cli::parse_from(["picycle-hid", "scripts", "save", "hello", "hello.txt"]);
        assert!(matches!(
            cli.command,
            Some(Command::Scripts {
                action: ScriptsAction::Save { .. }
            })
        ));
    }

    #[test]
    fn test_type_requires_text() {
        assert!(Cli::try_parse_from(["picycle-hid", "type"]).is_err());
    }

    #[test]
    fn test_key_command_accepts_ducky_alias() {
        // Arrange
        let recording = Recording::new();
        let mut encoder = ReportEncoder::new(recording.device(), recording.clock());

        // Act
        press_named(&mut encoder, "ESCAPE").unwrap();

        // Assert
        let reports = recording.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].keycode(), 0x29);
        assert!(reports[1].is_release());
    }

    #[test]
    fn test_combo_command_keeps_windows_as_gui() {
        // Arrange
        let recording = Recording::new();
        let mut encoder = ReportEncoder::new(recording.device(), recording.clock());
        let tokens = vec!["WINDOWS".to_string(), "r".to_string()];

        // Act
        let outcome = press_combo(&mut encoder, &tokens).unwrap();

        // Assert
        assert!(outcome.unknown.is_empty());
        let reports = recording.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].as_bytes(), &[0x08, 0, 0x15, 0, 0, 0, 0, 0]);
        assert!(reports[1].is_release());
    }
}
