//! Minimal object-stream driver.
//!
//! The host pipeline owns the real plumbing. This module gives the stages a
//! shared shape ([`Transform`]) and a driver ([`run`]) that feeds records in
//! order, collects forwarded records and per-file errors, and calls the
//! stage's completion hook once the input is exhausted.

use std::future::Future;
use tracing::warn;

use csslint_pipe_core::{FileRecord, PluginError};

/// A pipeline stage over file records.
pub trait Transform {
    /// Processes one record.
    ///
    /// `Ok` forwards the record downstream. `Err` delivers the error to the
    /// stream's error channel and drops the record.
    fn transform(
        &mut self,
        file: FileRecord,
    ) -> impl Future<Output = Result<FileRecord, PluginError>>;

    /// Called once after the last record.
    ///
    /// # Errors
    ///
    /// Returns an error to deliver on the stream's error channel.
    fn flush(&mut self) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Records and errors leaving a stage.
#[derive(Debug, Default)]
pub struct StreamOutput {
    /// Forwarded records, in input order.
    pub files: Vec<FileRecord>,
    /// Errors delivered on the error channel, in the order they occurred.
    pub errors: Vec<PluginError>,
}

impl StreamOutput {
    /// Feeds the forwarded records into the next stage.
    ///
    /// Errors already collected are kept ahead of the next stage's errors.
    pub async fn pipe<T: Transform>(self, stage: &mut T) -> Self {
        let mut next = run(stage, self.files).await;
        let mut errors = self.errors;
        errors.append(&mut next.errors);
        next.errors = errors;
        next
    }

    /// Returns true if no error was delivered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Drives `files` through `stage`, then flushes it.
pub async fn run<T, I>(stage: &mut T, files: I) -> StreamOutput
where
    T: Transform,
    I: IntoIterator<Item = FileRecord>,
{
    let mut output = StreamOutput::default();

    for file in files {
        match stage.transform(file).await {
            Ok(file) => output.files.push(file),
            Err(e) => {
                warn!(plugin = e.plugin(), "{e}");
                output.errors.push(e);
            }
        }
    }

    if let Err(e) = stage.flush() {
        warn!(plugin = e.plugin(), "{e}");
        output.errors.push(e);
    }

    output
}
