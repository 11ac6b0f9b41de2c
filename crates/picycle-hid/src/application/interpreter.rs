//! DuckyInterpreter: executes parsed script lines against a [`ReportEncoder`].
//!
//! Execution is strictly sequential.  Lines that cannot be carried out
//! (unknown keys, malformed integers) are logged and recorded as `skipped`;
//! only device failures and interruption abort the run.

use std::time::Duration;

use picycle_core::{parse_script, HidKeyCode, Modifier, ScriptCommand, ScriptLine};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use super::device::{Clock, HidDevice};
use super::encoder::{EncoderError, ReportEncoder};

/// What happened to one executed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineStatus {
    Typed {
        characters: usize,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        skipped: Vec<char>,
    },
    Pressed {
        key: String,
        modifier: Modifier,
    },
    Combo {
        modifier: Modifier,
        key: Option<HidKeyCode>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unknown: Vec<String>,
    },
    Delayed {
        ms: u64,
    },
    DefaultDelay {
        ms: u64,
    },
    Unsupported {
        keyword: String,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOutcome {
    pub line: usize,
    pub source: String,
    #[serde(flatten)]
    pub status: LineStatus,
}

/// Ordered record of a script run.  Comment lines are not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub lines: Vec<LineOutcome>,
}

impl ExecutionReport {
    /// Number of lines skipped outright.
    pub fn skipped(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l.status, LineStatus::Skipped { .. }))
            .count()
    }

    /// `true` when no line was skipped and no key or character was dropped.
    pub fn is_clean(&self) -> bool {
        self.lines.iter().all(|l| match &l.status {
            LineStatus::Skipped { .. } => false,
            LineStatus::Typed { skipped, .. } => skipped.is_empty(),
            LineStatus::Combo { unknown, .. } => unknown.is_empty(),
            _ => true,
        })
    }
}

/// A run that stopped early.
#[derive(Debug, Error)]
#[error("script aborted at line {line}: {source}")]
pub struct ExecutionError {
    pub line: usize,
    #[source]
    pub source: EncoderError,
    /// Outcomes of the lines that ran before the failure.
    pub partial: ExecutionReport,
}

/// Runs DuckyScript through a borrowed encoder.
pub struct DuckyInterpreter<'e, D, C> {
    encoder: &'e mut ReportEncoder<D, C>,
    default_delay: Duration,
}

impl<'e, D: HidDevice, C: Clock> DuckyInterpreter<'e, D, C> {
    pub fn new(encoder: &'e mut ReportEncoder<D, C>) -> Self {
        Self {
            encoder,
            default_delay: Duration::ZERO,
        }
    }

    /// Parses and executes `script`.
    pub fn run(&mut self, script: &str) -> Result<ExecutionReport, ExecutionError> {
        let lines = parse_script(script);
        info!(lines = lines.len(), "running script");
        self.run_lines(&lines)
    }

    /// Executes already-parsed lines in order.
    ///
    /// # Errors
    ///
    /// [`ExecutionError`] on the first device failure or interruption, with
    /// the outcomes gathered so far.
    pub fn run_lines(&mut self, lines: &[ScriptLine]) -> Result<ExecutionReport, ExecutionError> {
        let mut report = ExecutionReport::default();

        for line in lines {
            if let Err(source) = self.encoder.check_running() {
                return Err(abort(line, source, report));
            }

            let status = match &line.parsed {
                Ok(ScriptCommand::Comment) => continue,
                Ok(command) => match self.execute(command) {
                    Ok(status) => status,
                    Err(err) if err.is_recoverable() => {
                        warn!(line = line.number, error = %err, "skipping line");
                        LineStatus::Skipped {
                            reason: err.to_string(),
                        }
                    }
                    Err(err) => return Err(abort(line, err, report)),
                },
                Err(err) => {
                    warn!(line = line.number, error = %err, "skipping unparsable line");
                    LineStatus::Skipped {
                        reason: err.to_string(),
                    }
                }
            };

            report.lines.push(LineOutcome {
                line: line.number,
                source: line.source.clone(),
                status,
            });

            if !self.default_delay.is_zero() {
                self.encoder.pause(self.default_delay);
            }
        }

        info!(
            executed = report.lines.len(),
            skipped = report.skipped(),
            "script finished"
        );
        Ok(report)
    }

    /// Executes one command.
    pub fn execute(&mut self, command: &ScriptCommand) -> Result<LineStatus, EncoderError> {
        match command {
            ScriptCommand::TypeText(text) => {
                let outcome = self.encoder.type_text(text)?;
                Ok(LineStatus::Typed {
                    characters: outcome.typed,
                    skipped: outcome.skipped,
                })
            }
            ScriptCommand::PressKey { name, modifiers } => {
                let hold = self.encoder.timing().key_press;
                let stroke = self.encoder.press_key(name, *modifiers, hold)?;
                Ok(LineStatus::Pressed {
                    key: name.clone(),
                    modifier: stroke.modifier,
                })
            }
            ScriptCommand::Combo(tokens) => {
                let outcome = self.encoder.combo(tokens)?;
                Ok(LineStatus::Combo {
                    modifier: outcome.modifier,
                    key: outcome.key,
                    unknown: outcome.unknown,
                })
            }
            ScriptCommand::Delay(ms) => {
                self.encoder.pause(Duration::from_millis(*ms));
                Ok(LineStatus::Delayed { ms: *ms })
            }
            ScriptCommand::DefaultDelay(ms) => {
                self.default_delay = Duration::from_millis(*ms);
                Ok(LineStatus::DefaultDelay { ms: *ms })
            }
            ScriptCommand::Unsupported { keyword, .. } => {
                warn!(keyword = %keyword, "unsupported command has no effect");
                Ok(LineStatus::Unsupported {
                    keyword: keyword.clone(),
                })
            }
            ScriptCommand::Comment => Ok(LineStatus::Skipped {
                reason: "comment".to_string(),
            }),
        }
    }
}

fn abort(line: &ScriptLine, source: EncoderError, partial: ExecutionReport) -> ExecutionError {
    warn!(line = line.number, error = %source, "script aborted");
    ExecutionError {
        line: line.number,
        source,
        partial,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
