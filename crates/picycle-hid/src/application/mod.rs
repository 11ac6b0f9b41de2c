//! Application layer: keystroke encoding and script execution.
//!
//! Nothing here opens files or sleeps directly.  The device and the clock
//! come in through the traits in [`device`].

pub mod device;
pub mod encoder;
pub mod interpreter;
pub mod shell;

pub use device::{Clock, DeviceError, HidDevice};
pub use encoder::{ComboOutcome, EncoderError, Keystroke, ReportEncoder, TimingConfig, TypeOutcome};
pub use interpreter::{DuckyInterpreter, ExecutionError, ExecutionReport, LineOutcome, LineStatus};
pub use shell::{ShellCommand, ShellError};
