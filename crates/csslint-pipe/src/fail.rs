//! Fail stage: turns any diagnostic into a pipeline failure.

use std::future::{ready, Future};
use tracing::debug;

use csslint_pipe_core::{FileRecord, PluginError};

use crate::stream::Transform;

/// Fails every file whose report has messages. Renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailStage;

impl FailStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Passes files without a report or with a successful one.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::LintFailed`] naming the file's relative path.
    pub fn check(&self, file: FileRecord) -> Result<FileRecord, PluginError> {
        if !file.has_failed() {
            return Ok(file);
        }

        let relative = file.relative();
        debug!("Failing on {relative}");
        Err(PluginError::LintFailed { relative })
    }
}

impl Transform for FailStage {
    fn transform(
        &mut self,
        file: FileRecord,
    ) -> impl Future<Output = Result<FileRecord, PluginError>> {
        ready(self.check(file))
    }
}
