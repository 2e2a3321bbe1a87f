//! File records flowing through the pipeline.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::report::Report;

/// Placeholder path for records without one.
pub const STDIN: &str = "stdin";

/// Payload of a file record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Contents {
    /// No payload (e.g., a directory entry).
    #[default]
    Null,
    /// Materialized bytes.
    Buffer(Vec<u8>),
    /// Backed by a live byte stream; cannot be linted.
    Stream,
}

/// An in-memory file owned by the surrounding pipeline.
///
/// Stages only read it and attach a [`Report`].
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    /// Path of the file, `None` for standard input.
    pub path: Option<PathBuf>,
    /// Base directory that [`FileRecord::relative`] is computed against.
    pub base: Option<PathBuf>,
    /// File payload.
    pub contents: Contents,
    /// Lint report attached by the analyzer stage.
    pub report: Option<Report>,
}

impl FileRecord {
    /// Creates a buffered record.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: Some(path.into()),
            contents: Contents::Buffer(contents.into()),
            ..Self::default()
        }
    }

    /// Creates a buffered record without a path.
    #[must_use]
    pub fn stdin(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Contents::Buffer(contents.into()),
            ..Self::default()
        }
    }

    /// Creates a record with no payload.
    #[must_use]
    pub fn null(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Creates a record backed by a live stream.
    #[must_use]
    pub fn streaming(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            contents: Contents::Stream,
            ..Self::default()
        }
    }

    /// Reads a file from disk into a buffered record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let contents = tokio::fs::read(&path).await?;
        Ok(Self::new(path, contents))
    }

    /// Sets the base directory.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Returns true if the record has no payload.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self.contents, Contents::Null)
    }

    /// Returns true if the record is backed by a live stream.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(self.contents, Contents::Stream)
    }

    /// Decodes the payload as UTF-8, replacing invalid sequences.
    ///
    /// Returns `None` for null and streaming records.
    #[must_use]
    pub fn text(&self) -> Option<Cow<'_, str>> {
        match &self.contents {
            Contents::Buffer(bytes) => Some(String::from_utf8_lossy(bytes)),
            Contents::Null | Contents::Stream => None,
        }
    }

    /// Returns the path as a string, or `"stdin"` when unset.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| STDIN.to_string(), |p| p.display().to_string())
    }

    /// Returns the path relative to the base directory.
    ///
    /// Without a base, the working directory is the base. A path outside the
    /// base falls back to its file name.
    #[must_use]
    pub fn relative(&self) -> String {
        let Some(path) = self.path.as_deref() else {
            return STDIN.to_string();
        };

        let relative = match self.base.as_deref() {
            Some(base) => path.strip_prefix(base).ok().map(Path::to_path_buf),
            None if path.is_relative() => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf)),
        };

        relative
            .or_else(|| path.file_name().map(PathBuf::from))
            .unwrap_or_else(|| path.to_path_buf())
            .display()
            .to_string()
    }

    /// Returns true if a report is attached and it has messages.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.report.as_ref().is_some_and(|r| !r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_strips_base() {
        let file = FileRecord::new("test/fixtures/nested/a.css", "a{}").with_base("test/fixtures");
        assert_eq!(file.relative(), Path::new("nested/a.css").display().to_string());
    }

    #[test]
    fn relative_without_base_keeps_directories() {
        let a = FileRecord::new("a/x.css", "a{}");
        let b = FileRecord::new("b/x.css", "a{}");
        assert_eq!(a.relative(), Path::new("a/x.css").display().to_string());
        assert_ne!(a.relative(), b.relative());
    }

    #[test]
    fn relative_without_base_strips_working_dir() {
        let cwd = std::env::current_dir().unwrap();
        let file = FileRecord::new(cwd.join("styles").join("x.css"), "a{}");
        assert_eq!(file.relative(), Path::new("styles/x.css").display().to_string());
    }

    #[test]
    fn relative_outside_base_is_file_name() {
        let file = FileRecord::new("other/a.css", "a{}").with_base("test");
        assert_eq!(file.relative(), "a.css");
    }

    #[test]
    fn stdin_records_use_placeholder() {
        let file = FileRecord::stdin("a{}");
        assert_eq!(file.display_path(), STDIN);
        assert_eq!(file.relative(), STDIN);
    }

    #[test]
    fn text_decodes_lossily() {
        let file = FileRecord::new("a.css", vec![b'a', 0xff, b'{']);
        assert_eq!(file.text().as_deref(), Some("a\u{fffd}{"));
        assert!(FileRecord::null("a.css").text().is_none());
        assert!(FileRecord::streaming("a.css").text().is_none());
    }
}
