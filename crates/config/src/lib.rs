//! Rethrow Configuration Module
//!
//! Settings that shape how an exception bridge logs, reports and intercepts
//! faults. Settings are read from TOML; every field is optional.
//!
//! ```toml
//! capture_panics = true
//! report_faults = true
//! reported_kinds = ["InternalInconsistency", "RangeError"]
//! log_level = "warning"
//! ```

pub mod error;
pub mod log_level;

pub use error::{ConfigError, ConfigResult};
pub use log_level::LogLevel;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind reported by default; duplicate-key style model corruption.
pub const DEFAULT_REPORTED_KIND: &str = "InternalInconsistency";

/// Bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Treat a panicking unit of work like one that returned a fault.
    pub capture_panics: bool,
    /// Forward faults of `reported_kinds` to the fault reporter.
    pub report_faults: bool,
    /// Kind names (matched through the kind hierarchy) that get reported.
    pub reported_kinds: Vec<String>,
    /// Level used when logging an observed fault.
    pub log_level: LogLevel,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            capture_panics: true,
            report_faults: true,
            reported_kinds: vec![DEFAULT_REPORTED_KIND.to_string()],
            log_level: LogLevel::default(),
        }
    }
}

static CURRENT_CONFIG: Lazy<RwLock<BridgeConfig>> =
    Lazy::new(|| RwLock::new(BridgeConfig::default()));

impl BridgeConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: BridgeConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(index) = self
            .reported_kinds
            .iter()
            .position(|kind| kind.trim().is_empty())
        {
            return Err(ConfigError::invalid_config(format!(
                "reported_kinds[{}] is empty",
                index
            )));
        }
        Ok(())
    }

    /// Installs the process-wide configuration.
    /// When `config` is `None`, defaults are applied.
    pub fn load(config: Option<BridgeConfig>) {
        *CURRENT_CONFIG.write() = config.unwrap_or_default();
    }

    /// Returns the currently active configuration snapshot.
    pub fn current() -> BridgeConfig {
        CURRENT_CONFIG.read().clone()
    }

    /// Returns `true` when reporting is on and any of `kind_names` is listed
    /// in `reported_kinds`.
    ///
    /// Pass a fault kind's name together with its ancestors' names so that a
    /// listed kind also covers its subkinds.
    pub fn reports_any<'a, I>(&self, kind_names: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.report_faults
            && kind_names
                .into_iter()
                .any(|name| self.reported_kinds.iter().any(|kind| kind == name))
    }
}
