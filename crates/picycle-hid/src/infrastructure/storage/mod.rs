//! Storage infrastructure: the TOML config file and the script library.

pub mod config;
pub mod scripts;
