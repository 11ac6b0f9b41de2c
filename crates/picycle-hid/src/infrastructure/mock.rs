//! Recording device and clock for tests.
//!
//! The real [`HidGadget`](super::gadget::HidGadget) needs a configured USB
//! gadget and [`SystemClock`](super::clock::SystemClock) really sleeps.  The
//! types here replace both with in-memory recording so a test can assert the
//! exact interleaving of report writes and sleeps without waiting.
//!
//! # Usage in tests
//!
//! ```ignore
//! let recording = Recording::new();
//! let mut encoder = ReportEncoder::new(recording.device(), recording.clock());
//!
//! encoder.tap("enter").unwrap();
//!
//! assert_eq!(recording.reports().len(), 2);
//! ```
//!
//! # Failure injection
//!
//! [`Recording::failing_device`] returns a device that accepts a fixed number
//! of writes and then fails every later one with an I/O error.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use picycle_core::HidReport;

use crate::application::device::{Clock, DeviceError, HidDevice};

/// One observed side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Report(HidReport),
    Sleep(Duration),
}

/// Shared event log behind a recording device and clock.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(&self) -> RecordingDevice {
        RecordingDevice {
            events: Arc::clone(&self.events),
            fail_after: None,
            writes: 0,
        }
    }

    /// A device that fails every write after the first `successful` ones.
    pub fn failing_device(&self, successful: usize) -> RecordingDevice {
        RecordingDevice {
            fail_after: Some(successful),
            ..self.device()
        }
    }

    pub fn clock(&self) -> RecordingClock {
        RecordingClock {
            events: Arc::clone(&self.events),
        }
    }

    /// Every write and sleep, in order.
    pub fn events(&self) -> Vec<Recorded> {
        self.lock().clone()
    }

    pub fn reports(&self) -> Vec<HidReport> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                Recorded::Report(r) => Some(*r),
                Recorded::Sleep(_) => None,
            })
            .collect()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                Recorded::Sleep(d) => Some(*d),
                Recorded::Report(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        // A panicking test thread poisons the lock; the log is still usable.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Device half of a [`Recording`].
#[derive(Debug, Clone)]
pub struct RecordingDevice {
    events: Arc<Mutex<Vec<Recorded>>>,
    fail_after: Option<usize>,
    writes: usize,
}

impl HidDevice for RecordingDevice {
    fn write_report(&mut self, report: &HidReport) -> Result<(), DeviceError> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(DeviceError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock device failure",
            )));
        }
        self.writes += 1;
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Recorded::Report(*report));
        Ok(())
    }
}

/// Clock half of a [`Recording`].  Never actually sleeps.
#[derive(Debug, Clone)]
pub struct RecordingClock {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Clock for RecordingClock {
    fn sleep(&self, duration: Duration) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Recorded::Sleep(duration));
    }
}
