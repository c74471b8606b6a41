//! Retention configuration.
//!
//! The utility is configured via a small TOML file or constructed directly
//! by the host.
//!
//! # Example
//!
//! ```toml
//! log_dir = "/var/www/uploads/security"
//! max_age_hours = 168
//! enabled = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Log retention configuration.
///
/// Controls where the fixed log file set lives and how old the files may
/// get before the next triggered check purges them. The file set itself is
/// not configurable; see [`crate::retention::LOG_FILES`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionConfig {
    /// Directory containing the log files subject to retention.
    pub log_dir: PathBuf,

    /// Age threshold in hours. Once this much time has elapsed since the
    /// last check fired, the next check purges.
    /// Default: 168 (7 days)
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,

    /// Whether retention purging is enabled. When disabled, every check is
    /// a no-op and retention state is left untouched.
    /// Default: true
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_max_age_hours() -> u64 {
    7 * 24
}

/// Upper bound on `max_age_hours` (100 years). Values above this are
/// rejected at validation; they exceed any plausible retention policy and
/// the representable duration range.
const MAX_MAX_AGE_HOURS: u64 = 24 * 365 * 100;

fn default_enabled() -> bool {
    true
}

impl RetentionConfig {
    /// Build a configuration for `log_dir` with default thresholds.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            max_age_hours: default_max_age_hours(),
            enabled: default_enabled(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RetentionConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the age threshold as a [`chrono::Duration`].
    ///
    /// Values beyond the representable duration range saturate to
    /// [`chrono::Duration::MAX`] rather than panic; `validate()` rejects
    /// them long before this matters.
    pub fn max_age(&self) -> chrono::Duration {
        let hours = i64::try_from(self.max_age_hours).unwrap_or(i64::MAX);
        chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX)
    }

    /// Validate the configuration for consistency.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("log_dir must not be empty".into()));
        }

        if self.max_age_hours == 0 {
            return Err(ConfigError::Validation(
                "max_age_hours must be greater than zero".into(),
            ));
        }

        if self.max_age_hours > MAX_MAX_AGE_HOURS {
            return Err(ConfigError::Validation(format!(
                "max_age_hours must be at most {MAX_MAX_AGE_HOURS}"
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
