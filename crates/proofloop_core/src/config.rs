//! Runtime configuration supplied by the host.
//!
//! # Invariants
//! - Every field has a default; hosts may send partial JSON.
//! - A config handed to [`crate::Navigator`] has passed [`RuntimeConfig::validate`].

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_MAX_DEPTH: usize = 16;
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Default `animated` flag for push/present and self-initiated teardown.
    pub animated_transitions: bool,
    /// Maximum number of coordinators on any root-to-leaf path.
    pub max_depth: usize,
    /// Navigation commands retained by the stack adapter.
    pub history_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            animated_transitions: true,
            max_depth: DEFAULT_MAX_DEPTH,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl RuntimeConfig {
    /// # Errors
    /// - `ZeroMaxDepth` / `ZeroHistoryLimit` for zero bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }

    /// Parses host JSON; absent keys fall back to defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|err| ConfigError::Malformed(err.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroMaxDepth,
    ZeroHistoryLimit,
    Malformed(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroMaxDepth => write!(f, "max_depth must be at least 1"),
            Self::ZeroHistoryLimit => write!(f, "history_limit must be at least 1"),
            Self::Malformed(message) => write!(f, "malformed runtime config: {message}"),
        }
    }
}

impl Error for ConfigError {}
