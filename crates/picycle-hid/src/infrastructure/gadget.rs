//! Linux USB gadget keyboard device (`/dev/hidgN`).
//!
//! The gadget driver exposes the host-facing HID function as a character
//! device.  Each `write(2)` of exactly 8 bytes becomes one input report on
//! the USB host.  Opening requires the gadget to be configured (configfs)
//! and write permission on the node, usually root or a udev rule.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use picycle_core::HidReport;
use tracing::info;

use crate::application::device::{DeviceError, HidDevice};

pub const DEFAULT_DEVICE_PATH: &str = "/dev/hidg0";

/// An open gadget character device.
#[derive(Debug)]
pub struct HidGadget {
    file: File,
}

impl HidGadget {
    /// Opens the device read-write.
    ///
    /// # Errors
    ///
    /// - [`DeviceError::Unavailable`] when the node does not exist.
    /// - [`DeviceError::PermissionDenied`] on `EACCES`/`EPERM`.
    /// - [`DeviceError::Io`] for anything else.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| open_error(path, e))?;
        info!(device = %path.display(), "opened HID gadget");
        Ok(Self { file })
    }
}

impl HidDevice for HidGadget {
    fn write_report(&mut self, report: &HidReport) -> Result<(), DeviceError> {
        // write_all turns a zero-length write into ErrorKind::WriteZero.
        self.file.write_all(report.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

fn open_error(path: &Path, err: std::io::Error) -> DeviceError {
    match err.kind() {
        ErrorKind::NotFound => DeviceError::Unavailable {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => DeviceError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => DeviceError::Io(err),
    }
}
