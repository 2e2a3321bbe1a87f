//! Configuration types for csslint-pipe.

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::ruleset::RuleSet;

/// Name of the per-directory configuration file.
pub const RC_FILE_NAME: &str = ".csslintrc";

/// Option key that toggles the ancestor search for [`RC_FILE_NAME`].
pub const LOOKUP_KEY: &str = "lookup";

/// Caller-supplied configuration of an analyzer stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnalyzerOptions {
    /// No options: catalogue defaults plus whatever `.csslintrc` is found.
    #[default]
    None,
    /// Rule overrides applied beneath any `.csslintrc` found.
    Rules(RuleSet),
    /// Path to a configuration file used instead of searching.
    File(PathBuf),
}

impl From<RuleSet> for AnalyzerOptions {
    fn from(rules: RuleSet) -> Self {
        Self::Rules(rules)
    }
}

impl From<PathBuf> for AnalyzerOptions {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for AnalyzerOptions {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<&str> for AnalyzerOptions {
    fn from(path: &str) -> Self {
        Self::File(PathBuf::from(path))
    }
}

/// Parses the contents of a configuration file.
///
/// An empty (or whitespace-only) file is an empty rule set.
///
/// # Errors
///
/// Returns an error if the content is not JSON or not a JSON object.
pub fn parse_rc(content: &str, path: &Path) -> Result<RuleSet, ConfigError> {
    if content.trim().is_empty() {
        return Ok(RuleSet::new());
    }

    let value: Value = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn read_rc(path: &Path) -> Result<RuleSet, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    parse_rc(&content, path)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// The config file parsed, but is not a key/value mapping.
    #[error("Config file {path} must contain a JSON object")]
    NotAnObject {
        /// Offending path.
        path: PathBuf,
    },
}
