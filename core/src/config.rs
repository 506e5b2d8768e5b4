//! Configuration management
//!
//! The configuration document lives under the user's home directory and is
//! entirely optional. Any failure to read or parse it yields the built-in
//! defaults as a whole; there is no per-field merge with defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::jsonc::strip_comments;

/// Default configuration values
const DEFAULT_WARNING_PERCENT: f64 = 80.0;
const DEFAULT_CRITICAL_PERCENT: f64 = 95.0;
const DEFAULT_HEADER_ICON: &str = "\u{1f4be}";
const DEFAULT_HEADER_TEXT: &str = "Disk Space Status";
const DEFAULT_USAGE_MESSAGE: &str = "Disk space: {percent}% used ({available} available)";
const DEFAULT_CRITICAL_MESSAGE: &str =
    "\u{26a0}\u{fe0f}  CRITICAL: Disk nearly full - {percent}% used (only {available} remaining)";

/// Configuration file location relative to the home directory
const CONFIG_SUBPATH: &str = ".claude/cpi-si/system/data/config/session/disk-monitoring.jsonc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Home directory could not be resolved")]
    NoHome,
}

/// Usage percentages at which warnings and critical alerts start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    pub warning_percent: f64,
    pub critical_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    pub header_icon: String,
    pub header_text: String,
    pub show_when_healthy: bool,
    #[serde(rename = "healthy_message")]
    pub healthy_template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    #[serde(rename = "warning")]
    pub warning_template: String,
    #[serde(rename = "critical")]
    pub critical_template: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorFlags {
    /// Master switch; when false no disk query happens at all
    pub enabled: bool,
    /// Read by the hook that decides whether to run the check at session start
    pub check_on_session_start: bool,
}

/// Complete disk-check configuration.
///
/// `Default` gives the built-in configuration. A document that omits a
/// section or a field leaves it at its zero value, matching what the document
/// literally says rather than patching in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub thresholds: ThresholdSet,
    #[serde(default)]
    pub display: DisplayPreferences,
    #[serde(default)]
    pub messages: MessageTemplates,
    #[serde(default)]
    pub behavior: BehaviorFlags,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            thresholds: ThresholdSet {
                warning_percent: DEFAULT_WARNING_PERCENT,
                critical_percent: DEFAULT_CRITICAL_PERCENT,
            },
            display: DisplayPreferences {
                header_icon: DEFAULT_HEADER_ICON.to_string(),
                header_text: DEFAULT_HEADER_TEXT.to_string(),
                show_when_healthy: false,
                healthy_template: DEFAULT_USAGE_MESSAGE.to_string(),
            },
            messages: MessageTemplates {
                warning_template: DEFAULT_USAGE_MESSAGE.to_string(),
                critical_template: DEFAULT_CRITICAL_MESSAGE.to_string(),
            },
            behavior: BehaviorFlags {
                enabled: true,
                check_on_session_start: true,
            },
        }
    }
}

impl Configuration {
    /// Parse a JSON-with-comments document.
    pub fn from_jsonc(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&strip_comments(text))
    }

    /// Header line shown above every notification
    pub fn header(&self) -> String {
        format!("{} {}", self.display.header_icon, self.display.header_text)
    }

    /// Non-fatal problems with the loaded values.
    ///
    /// These never trigger a fallback; classification still resolves them
    /// deterministically.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let t = &self.thresholds;

        for (name, value) in [
            ("warning_percent", t.warning_percent),
            ("critical_percent", t.critical_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                warnings.push(format!("{} = {} is outside 0-100", name, value));
            }
        }

        if t.critical_percent <= t.warning_percent {
            warnings.push(format!(
                "critical_percent ({}) <= warning_percent ({}); critical wins at the boundary",
                t.critical_percent, t.warning_percent
            ));
        }

        warnings
    }
}

/// Get the default configuration file path
///
/// `None` when `HOME` is unset or empty; no other home lookup is attempted.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").filter(|h| !h.is_empty())?;
    dirs::home_dir().map(|h| h.join(CONFIG_SUBPATH))
}

/// Load configuration from a file, reporting why it could not be used
pub fn try_load(path: &Path) -> Result<Configuration, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = Configuration::from_jsonc(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for warning in config.warnings() {
        tracing::warn!(path = %path.display(), "disk config: {}", warning);
    }

    Ok(config)
}

/// Load configuration from a file, falling back to defaults on any error
pub fn load(path: &Path) -> Configuration {
    match try_load(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "using default disk configuration");
            Configuration::default()
        }
    }
}

/// Load configuration from the default location under the home directory
pub fn load_default() -> Configuration {
    match default_config_path() {
        Some(path) => load(&path),
        None => {
            tracing::debug!(error = %ConfigError::NoHome, "using default disk configuration");
            Configuration::default()
        }
    }
}
