//! Client tuning knobs.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunable policy for a [`GameClient`](crate::GameClient).
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Delay between a snapshot arriving and the automated opponent being
    /// consulted, so a board animation can finish undisturbed.
    #[serde(default = "default_animation_delay_ms")]
    animation_delay_ms: u64,

    /// Prior aligned votes a cell needs before a new community proposal for
    /// it carries a resolving move.
    #[serde(default = "default_quorum")]
    quorum: u32,
}

fn default_animation_delay_ms() -> u64 {
    500
}

fn default_quorum() -> u32 {
    2
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            animation_delay_ms: default_animation_delay_ms(),
            quorum: default_quorum(),
        }
    }
}

impl ClientConfig {
    /// The animation delay as a [`Duration`].
    pub fn animation_delay(&self) -> Duration {
        Duration::from_millis(self.animation_delay_ms)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            animation_delay_ms = config.animation_delay_ms,
            quorum = config.quorum,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_platform_policy() {
        let config = ClientConfig::default();
        assert_eq!(config.animation_delay(), Duration::from_millis(500));
        assert_eq!(*config.quorum(), 2);
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "animation_delay_ms = 250").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.animation_delay(), Duration::from_millis(250));
        assert_eq!(*config.quorum(), 2);
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "animation_delay_ms = \"soon\"").unwrap();

        let result = ClientConfig::from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }
}
