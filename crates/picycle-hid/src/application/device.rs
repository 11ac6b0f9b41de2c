//! Ports the application layer writes through: the HID device and the clock.
//!
//! Both are injected into [`ReportEncoder`](super::encoder::ReportEncoder) at
//! construction.  The real implementations live in the infrastructure layer;
//! tests substitute recording fakes so nothing waits in real time.

use std::path::PathBuf;
use std::time::Duration;

use picycle_core::HidReport;
use thiserror::Error;

/// Error type for device access.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The character device does not exist (gadget not configured).
    #[error("HID device {} not found; is the USB gadget configured?", path.display())]
    Unavailable { path: PathBuf },

    /// The device exists but cannot be opened for writing.
    #[error("permission denied opening {} for writing", path.display())]
    PermissionDenied { path: PathBuf },

    /// A write to an open device failed.
    #[error("HID write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Sink for keyboard reports.
///
/// Implementations perform one blocking write of exactly
/// [`REPORT_LEN`](picycle_core::REPORT_LEN) bytes per call and never retry.
#[cfg_attr(test, mockall::automock)]
pub trait HidDevice {
    fn write_report(&mut self, report: &HidReport) -> Result<(), DeviceError>;
}

impl<T: HidDevice + ?Sized> HidDevice for Box<T> {
    fn write_report(&mut self, report: &HidReport) -> Result<(), DeviceError> {
        (**self).write_report(report)
    }
}

/// Blocking time suspension.
///
/// Every press duration, inter-key gap, and script `DELAY` goes through this
/// trait.  Delays are honoured in full; there is no timeout.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

impl<T: Clock + ?Sized> Clock for Box<T> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
