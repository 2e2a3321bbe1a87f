//! Formatter contract: a three-phase renderer of engine reports.

use std::fmt;
use std::sync::Arc;

use crate::error::PluginError;
use crate::types::EngineReport;

/// Options forwarded to every `format_results` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Render nothing for files without messages.
    pub quiet: bool,
}

/// Renders engine reports.
///
/// Output is assembled as `start_format()`, then one `format_results()`
/// per reported file, then `end_format()`.
pub trait Formatter: Send + Sync {
    /// Returns the registry identifier (e.g., "checkstyle-xml").
    fn id(&self) -> &str;

    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns the output that opens the document.
    fn start_format(&self) -> String {
        String::new()
    }

    /// Renders the messages of one file.
    fn format_results(&self, report: &EngineReport, path: &str, options: &FormatOptions) -> String;

    /// Returns the output that closes the document.
    fn end_format(&self) -> String {
        String::new()
    }
}

/// Type alias for shared Formatter trait objects.
pub type FormatterRef = Arc<dyn Formatter>;

type PhaseFn = Arc<dyn Fn() -> String + Send + Sync>;
type ResultsFn = Arc<dyn Fn(&EngineReport, &str, &FormatOptions) -> String + Send + Sync>;

/// A formatter object assembled at runtime, validated at the boundary.
///
/// Every capability is optional while building; [`FormatterDescriptor::validate`]
/// rejects descriptors missing any of `id`, `name`, `startFormat`,
/// `formatResults` or `endFormat`.
#[derive(Clone, Default)]
pub struct FormatterDescriptor {
    id: Option<String>,
    name: Option<String>,
    start_format: Option<PhaseFn>,
    format_results: Option<ResultsFn>,
    end_format: Option<PhaseFn>,
}

impl FormatterDescriptor {
    /// Creates an empty descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the opening phase.
    #[must_use]
    pub fn start_format<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.start_format = Some(Arc::new(f));
        self
    }

    /// Sets the per-file phase.
    #[must_use]
    pub fn format_results<F>(mut self, f: F) -> Self
    where
        F: Fn(&EngineReport, &str, &FormatOptions) -> String + Send + Sync + 'static,
    {
        self.format_results = Some(Arc::new(f));
        self
    }

    /// Sets the closing phase.
    #[must_use]
    pub fn end_format<F>(mut self, f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.end_format = Some(Arc::new(f));
        self
    }

    /// Returns the names of the capabilities still missing.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("id", self.id.is_some()),
            ("name", self.name.is_some()),
            ("startFormat", self.start_format.is_some()),
            ("endFormat", self.end_format.is_some()),
            ("formatResults", self.format_results.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| (!present).then_some(field))
        .collect()
    }

    /// Checks the shape and turns the descriptor into a formatter.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidFormatterShape`] naming the missing
    /// capabilities.
    pub fn validate(self) -> Result<FormatterRef, PluginError> {
        match (
            self.id,
            self.name,
            self.start_format,
            self.format_results,
            self.end_format,
        ) {
            (Some(id), Some(name), Some(start), Some(results), Some(end)) => {
                Ok(Arc::new(DescribedFormatter {
                    id,
                    name,
                    start,
                    results,
                    end,
                }))
            }
            (id, name, start, results, end) => {
                let missing = Self {
                    id,
                    name,
                    start_format: start,
                    format_results: results,
                    end_format: end,
                }
                .missing();
                Err(PluginError::InvalidFormatterShape { missing })
            }
        }
    }
}

impl fmt::Debug for FormatterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("missing", &self.missing())
            .finish()
    }
}

struct DescribedFormatter {
    id: String,
    name: String,
    start: PhaseFn,
    results: ResultsFn,
    end: PhaseFn,
}

impl Formatter for DescribedFormatter {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn start_format(&self) -> String {
        (self.start)()
    }

    fn format_results(&self, report: &EngineReport, path: &str, options: &FormatOptions) -> String {
        (self.results)(report, path, options)
    }

    fn end_format(&self) -> String {
        (self.end)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> FormatterDescriptor {
        FormatterDescriptor::new()
            .id("count")
            .name("Message count")
            .start_format(|| "[".to_string())
            .format_results(|report, path, _| format!("{path}={}", report.messages.len()))
            .end_format(|| "]".to_string())
    }

    #[test]
    fn complete_descriptor_validates() {
        let formatter = complete().validate().expect("complete descriptor");
        assert_eq!(formatter.id(), "count");
        assert_eq!(formatter.start_format(), "[");
        assert_eq!(
            formatter.format_results(&EngineReport::new(), "a.css", &FormatOptions::default()),
            "a.css=0"
        );
        assert_eq!(formatter.end_format(), "]");
    }

    #[test]
    fn missing_format_results_is_rejected() {
        let descriptor = FormatterDescriptor::new()
            .id("broken")
            .name("Broken")
            .start_format(String::new)
            .end_format(String::new);

        let err = descriptor.validate().err().expect("shape error");
        match err {
            PluginError::InvalidFormatterShape { missing } => {
                assert_eq!(missing, vec!["formatResults"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_descriptor_lists_everything() {
        assert_eq!(
            FormatterDescriptor::new().missing(),
            vec!["id", "name", "startFormat", "endFormat", "formatResults"]
        );
    }
}
