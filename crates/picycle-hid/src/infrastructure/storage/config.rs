//! TOML configuration for the injector.
//!
//! The file lives at `/etc/picycle/config.toml` unless `--config` (or
//! `PICYCLE_CONFIG`) points elsewhere.  Every field is optional:
//!
//! ```toml
//! log_level = "info"
//!
//! [device]
//! path = "/dev/hidg0"
//!
//! [timing]
//! key_press_ms = 50
//! key_gap_ms = 10
//! combo_hold_ms = 100
//! char_delay_ms = 50
//!
//! [scripts]
//! directory = "/etc/picycle/scripts"
//! ```
//!
//! A missing file is not an error; the defaults above apply.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::encoder::TimingConfig;
use crate::infrastructure::gadget::DEFAULT_DEVICE_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/picycle/config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error accessing config at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub scripts: ScriptsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Gadget character device.
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
}

/// Keystroke timing in milliseconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingSettings {
    #[serde(default = "default_key_press_ms")]
    pub key_press_ms: u64,
    #[serde(default = "default_key_gap_ms")]
    pub key_gap_ms: u64,
    #[serde(default = "default_combo_hold_ms")]
    pub combo_hold_ms: u64,
    #[serde(default = "default_char_delay_ms")]
    pub char_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptsConfig {
    /// Directory backing the script library.
    #[serde(default = "default_scripts_dir")]
    pub directory: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_device_path() -> PathBuf {
    PathBuf::from(DEFAULT_DEVICE_PATH)
}
fn default_key_press_ms() -> u64 {
    50
}
fn default_key_gap_ms() -> u64 {
    10
}
fn default_combo_hold_ms() -> u64 {
    100
}
fn default_char_delay_ms() -> u64 {
    50
}
fn default_scripts_dir() -> PathBuf {
    PathBuf::from("/etc/picycle/scripts")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            device: DeviceConfig::default(),
            timing: TimingSettings::default(),
            scripts: ScriptsConfig::default(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            key_press_ms: default_key_press_ms(),
            key_gap_ms: default_key_gap_ms(),
            combo_hold_ms: default_combo_hold_ms(),
            char_delay_ms: default_char_delay_ms(),
        }
    }
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            directory: default_scripts_dir(),
        }
    }
}

impl From<TimingSettings> for TimingConfig {
    fn from(t: TimingSettings) -> Self {
        TimingConfig {
            key_press: Duration::from_millis(t.key_press_ms),
            key_gap: Duration::from_millis(t.key_gap_ms),
            combo_hold: Duration::from_millis(t.combo_hold_ms),
            char_delay: Duration::from_millis(t.char_delay_ms),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
