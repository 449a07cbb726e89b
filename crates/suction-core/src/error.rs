//! Configuration error types.
//!
//! The tick path never fails; degenerate runtime conditions become no-ops or
//! events. Errors only arise while loading and validating configuration.

use std::fmt;
use std::io;

/// Error raised while loading or validating a `SuctionConfig`.
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    Io(io::Error),
    /// The config text is not valid JSON for `SuctionConfig`.
    Parse(serde_json::Error),
    /// A value is outside its accepted range.
    InvalidValue {
        /// Dotted path of the offending field.
        name: String,
        value: f64,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
    /// No mode profile is configured.
    NoModes,
    /// A mode name is empty or used twice.
    DuplicateMode(String),
    /// A command or config section referred to a mode that does not exist.
    UnknownMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::InvalidValue {
                name,
                value,
                expected,
            } => write!(f, "config value '{name}' = {value} is outside {expected}"),
            ConfigError::NoModes => write!(f, "at least one mode profile is required"),
            ConfigError::DuplicateMode(name) => {
                write!(f, "mode name '{name}' is empty or duplicated")
            }
            ConfigError::UnknownMode(name) => write!(f, "unknown mode '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value,
            expected: "(0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn require_non_negative(name: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value,
            expected: "[0, ∞)",
        })
    }
}

/// Returns an error unless `min <= value <= max`.
pub fn require_within(
    name: &str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> ConfigResult<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value,
            expected,
        })
    }
}
