//! Core library for the session-start disk space check
//!
//! This library decides whether a workspace's disk usage deserves a warning
//! and prints it, exposed both as a Rust API and via a C FFI for hook hosts.

pub mod config;
pub mod disk;
pub mod display;
mod ffi;
mod jsonc;
pub mod monitor;
pub mod render;
pub mod severity;

pub use config::{Configuration, ThresholdSet};
pub use disk::{DiskError, DiskUsageProvider, StatvfsProvider, UsageSnapshot};
pub use display::{Presenter, Style, Terminal};
pub use ffi::*;
pub use monitor::{DiskMonitor, Notification};
pub use severity::Severity;
