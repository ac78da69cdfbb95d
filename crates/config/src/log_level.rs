use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Level at which the bridge logs observed faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// The debug log level.
    #[default]
    Debug = 0,

    /// The information log level.
    Info = 1,

    /// The warning log level.
    Warning = 2,

    /// The error log level.
    Error = 3,

    /// The fatal log level. Logged as an error; `tracing` has nothing higher.
    Fatal = 4,
}

impl LogLevel {
    pub const DEBUG_LEVEL: u8 = 0;
    pub const INFO_LEVEL: u8 = 1;
    pub const WARNING_LEVEL: u8 = 2;
    pub const ERROR_LEVEL: u8 = 3;
    pub const FATAL_LEVEL: u8 = 4;

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" | "information" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" | "critical" => Ok(LogLevel::Fatal),
            _ => Err(ConfigError::UnknownLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, ConfigError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}
