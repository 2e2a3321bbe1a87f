//! Per-file configuration resolution.
//!
//! For every file the loader produces the caller layer of the effective
//! configuration:
//!
//! 1. the caller defaults (`AnalyzerOptions::Rules` or the contents of
//!    `AnalyzerOptions::File`)
//! 2. overlaid with the nearest `.csslintrc`, searched from the file's
//!    directory upwards (skipped for `AnalyzerOptions::File`, or when the
//!    rules carry `"lookup": false`)

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::config::{read_rc, AnalyzerOptions, ConfigError, LOOKUP_KEY, RC_FILE_NAME};
use crate::ruleset::RuleSet;

#[derive(Debug, Clone)]
enum Defaults {
    Rules(RuleSet),
    File(PathBuf),
}

/// Resolves the caller configuration layer for each file path.
///
/// Parsed config files are cached for the loader's lifetime.
#[derive(Debug)]
pub struct ConfigLoader {
    defaults: Defaults,
    lookup: bool,
    working_dir: PathBuf,
    cache: Mutex<HashMap<PathBuf, RuleSet>>,
}

impl ConfigLoader {
    /// Creates a loader for the given caller options.
    #[must_use]
    pub fn new(options: AnalyzerOptions) -> Self {
        let (defaults, lookup) = match options {
            AnalyzerOptions::None => (Defaults::Rules(RuleSet::new()), true),
            AnalyzerOptions::Rules(mut rules) => {
                let lookup = match rules.remove(LOOKUP_KEY) {
                    Some(Value::Bool(lookup)) => lookup,
                    _ => true,
                };
                (Defaults::Rules(rules), lookup)
            }
            AnalyzerOptions::File(path) => (Defaults::File(path), false),
        };

        // Relative file paths are anchored here; read once so `find` stays
        // free of blocking calls.
        let working_dir = std::env::current_dir().unwrap_or_default();

        Self {
            defaults,
            lookup,
            working_dir,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether ancestor directories are searched for `.csslintrc`.
    #[must_use]
    pub fn lookup(&self) -> bool {
        self.lookup
    }

    /// Resolves the caller configuration for a file.
    ///
    /// `None` (a record without a path) yields the defaults only.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed.
    pub async fn resolve(&self, file_path: Option<&Path>) -> Result<RuleSet, ConfigError> {
        let mut resolved = match &self.defaults {
            Defaults::Rules(rules) => rules.clone(),
            Defaults::File(path) => self.load(path).await?,
        };

        if self.lookup {
            if let Some(path) = file_path {
                if let Some(found) = self.find(path).await? {
                    resolved.extend(found);
                }
            }
        }

        Ok(resolved)
    }

    /// Finds and loads the nearest `.csslintrc` above `file_path`.
    async fn find(&self, file_path: &Path) -> Result<Option<RuleSet>, ConfigError> {
        let absolute = self.working_dir.join(file_path);

        let Some(start) = absolute.parent() else {
            return Ok(None);
        };

        for dir in start.ancestors() {
            let candidate = dir.join(RC_FILE_NAME);
            if self.cached(&candidate).is_some() || is_file(&candidate).await {
                tracing::debug!("Found config: {}", candidate.display());
                return self.load(&candidate).await.map(Some);
            }
        }

        Ok(None)
    }

    async fn load(&self, path: &Path) -> Result<RuleSet, ConfigError> {
        if let Some(rules) = self.cached(path) {
            return Ok(rules);
        }

        let rules = read_rc(path).await?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), rules.clone());
        Ok(rules)
    }

    fn cached(&self, path: &Path) -> Option<RuleSet> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(AnalyzerOptions::None)
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}
