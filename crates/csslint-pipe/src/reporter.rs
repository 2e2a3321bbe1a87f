//! Formatter stage: renders the reports attached by the analyzer stage.
//!
//! The formatter argument is resolved once, at construction, into one of
//! two strategies:
//!
//! - **phased**: a registered or described [`Formatter`]. Its
//!   `start_format()` output is buffered at construction, `format_results()`
//!   output is buffered per failed file, and `end_format()` is appended on
//!   flush. The buffer is then written to the [`Logger`], one call per
//!   non-empty chunk.
//! - **function**: a caller closure invoked directly per failed file, with
//!   no buffering and no start/end phases.
//!
//! The `"fail"` argument selects the [`FailStage`] instead.

use serde_json::Value;
use std::fmt;
use std::future::{ready, Future};
use std::io::Write;
use tracing::{debug, info, warn};

use csslint_pipe_core::template::descriptor_from_map;
use csslint_pipe_core::{
    FileRecord, FormatOptions, Formatter, FormatterDescriptor, FormatterRef, LintEngine,
    PluginError, Report,
};

use crate::fail::FailStage;
use crate::stream::Transform;

/// Identifier of the formatter used when none is requested.
pub const DEFAULT_FORMATTER: &str = "text";

/// Identifier that selects the fail stage.
pub const FAIL_FORMATTER: &str = "fail";

/// A caller-supplied renderer invoked once per failed file.
pub type FormatFn = Box<dyn FnMut(&Report, &str, &FormatOptions) + Send>;

/// The formatter argument accepted by [`FormatterStage::new`].
#[derive(Default)]
pub enum FormatterArg {
    /// The built-in `text` formatter.
    #[default]
    Default,
    /// A registered formatter, or `"fail"` for the fail stage.
    Named(String),
    /// A one-phase renderer.
    Function(FormatFn),
    /// A formatter object checked for the required capabilities.
    Object(FormatterDescriptor),
    /// A formatter that is valid by construction.
    Instance(FormatterRef),
}

impl FormatterArg {
    /// Wraps a closure as a one-phase renderer.
    pub fn function<F>(f: F) -> Self
    where
        F: FnMut(&Report, &str, &FormatOptions) + Send + 'static,
    {
        Self::Function(Box::new(f))
    }
}

impl fmt::Debug for FormatterArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Named(id) => f.debug_tuple("Named").field(id).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
            Self::Object(descriptor) => f.debug_tuple("Object").field(descriptor).finish(),
            Self::Instance(formatter) => f.debug_tuple("Instance").field(&formatter.id()).finish(),
        }
    }
}

impl From<&str> for FormatterArg {
    fn from(id: &str) -> Self {
        Self::Named(id.to_string())
    }
}

impl From<String> for FormatterArg {
    fn from(id: String) -> Self {
        Self::Named(id)
    }
}

impl From<FormatterDescriptor> for FormatterArg {
    fn from(descriptor: FormatterDescriptor) -> Self {
        Self::Object(descriptor)
    }
}

impl From<FormatterRef> for FormatterArg {
    fn from(formatter: FormatterRef) -> Self {
        Self::Instance(formatter)
    }
}

impl TryFrom<Value> for FormatterArg {
    type Error = PluginError;

    /// Accepts `null`, a formatter id, or a template map.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let found = match value {
            Value::Null => return Ok(Self::Default),
            Value::String(id) => return Ok(Self::Named(id)),
            Value::Object(map) => return Ok(Self::Object(descriptor_from_map(&map))),
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Array(_) => "array",
        };
        Err(PluginError::InvalidFormatterArgument {
            found: found.to_string(),
        })
    }
}

/// Sink receiving buffered output, one chunk per call.
#[derive(Default)]
pub enum Logger {
    /// Writes each chunk to standard output without a trailing newline.
    #[default]
    Stdout,
    /// Calls the closure with each chunk.
    Custom(Box<dyn FnMut(&str) + Send>),
}

impl Logger {
    /// Wraps a closure as a sink.
    pub fn custom<F>(f: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self::Custom(Box::new(f))
    }

    /// Returns true for the built-in standard output sink.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Stdout)
    }

    fn log(&mut self, chunk: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                if let Err(e) = out.write_all(chunk.as_bytes()).and_then(|()| out.flush()) {
                    warn!("Failed to write formatter output: {e}");
                }
            }
            Self::Custom(f) => f(chunk),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Options of a formatter stage.
#[derive(Debug, Default)]
pub struct FormatterOptions {
    /// Where buffered output goes on flush.
    pub logger: Logger,
    /// Options forwarded to the formatter.
    pub format: FormatOptions,
}

impl FormatterOptions {
    /// Sets the sink.
    #[must_use]
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Sets the options forwarded to the formatter.
    #[must_use]
    pub fn format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }
}

enum Strategy {
    Phased {
        formatter: FormatterRef,
        buffer: Vec<String>,
    },
    Function(FormatFn),
}

/// Renders failed reports through a formatter.
pub struct RenderStage {
    strategy: Strategy,
    logger: Logger,
    format: FormatOptions,
    flushed: bool,
}

impl RenderStage {
    fn phased(formatter: FormatterRef, options: FormatterOptions) -> Self {
        debug!("Using formatter: {}", formatter.id());
        let buffer = vec![formatter.start_format()];
        Self {
            strategy: Strategy::Phased { formatter, buffer },
            logger: options.logger,
            format: options.format,
            flushed: false,
        }
    }

    fn function(f: FormatFn, options: FormatterOptions) -> Self {
        Self {
            strategy: Strategy::Function(f),
            logger: options.logger,
            format: options.format,
            flushed: false,
        }
    }

    /// Returns the id of the formatter, `None` for a function renderer.
    #[must_use]
    pub fn formatter_id(&self) -> Option<&str> {
        match &self.strategy {
            Strategy::Phased { formatter, .. } => Some(formatter.id()),
            Strategy::Function(_) => None,
        }
    }

    /// Renders the file's report if it failed, and returns the file.
    pub fn render(&mut self, file: FileRecord) -> FileRecord {
        let Some(report) = file.report.as_ref().filter(|r| !r.success) else {
            return file;
        };
        let path = file.display_path();

        match &mut self.strategy {
            Strategy::Phased { formatter, buffer } => {
                buffer.push(formatter.format_results(&report.original, &path, &self.format));
            }
            Strategy::Function(f) => f(report, &path, &self.format),
        }
        file
    }

    /// Appends the closing phase and writes the buffer to the sink.
    ///
    /// Empty chunks are skipped. Does nothing for function renderers or
    /// when already finished.
    pub fn finish(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;

        let Strategy::Phased { formatter, buffer } = &mut self.strategy else {
            return;
        };
        buffer.push(formatter.end_format());

        let chunks: Vec<String> = buffer.drain(..).filter(|c| !c.is_empty()).collect();
        info!("Flushing {} chunks from formatter {}", chunks.len(), formatter.id());
        for chunk in &chunks {
            self.logger.log(chunk);
        }
    }
}

impl fmt::Debug for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderStage")
            .field("formatter", &self.formatter_id())
            .field("logger", &self.logger)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// The stage built from a formatter argument.
#[derive(Debug)]
pub enum FormatterStage {
    /// Renders diagnostics.
    Render(RenderStage),
    /// Fails for every file with diagnostics.
    Fail(FailStage),
}

impl FormatterStage {
    /// Resolves the formatter argument against the engine's registry.
    ///
    /// # Errors
    ///
    /// - [`PluginError::InvalidFormatter`] for an unknown formatter id
    /// - [`PluginError::InvalidFormatterShape`] for an incomplete object
    pub fn new(
        engine: &dyn LintEngine,
        arg: impl Into<FormatterArg>,
        options: FormatterOptions,
    ) -> Result<Self, PluginError> {
        let formatter = match arg.into() {
            FormatterArg::Default => engine
                .formatter(DEFAULT_FORMATTER)
                .ok_or_else(|| PluginError::InvalidFormatter(DEFAULT_FORMATTER.to_string()))?,
            FormatterArg::Named(id) if id == FAIL_FORMATTER => {
                return Ok(Self::Fail(FailStage::new()));
            }
            FormatterArg::Named(id) => engine
                .formatter(&id)
                .ok_or(PluginError::InvalidFormatter(id))?,
            FormatterArg::Function(f) => return Ok(Self::Render(RenderStage::function(f, options))),
            FormatterArg::Object(descriptor) => descriptor.validate()?,
            FormatterArg::Instance(formatter) => formatter,
        };
        Ok(Self::Render(RenderStage::phased(formatter, options)))
    }

    /// Returns true if the argument selected the fail stage.
    #[must_use]
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

impl Transform for FormatterStage {
    fn transform(
        &mut self,
        file: FileRecord,
    ) -> impl Future<Output = Result<FileRecord, PluginError>> {
        let result = match self {
            Self::Render(stage) => Ok(stage.render(file)),
            Self::Fail(stage) => stage.check(file),
        };
        ready(result)
    }

    fn flush(&mut self) -> Result<(), PluginError> {
        if let Self::Render(stage) = self {
            stage.finish();
        }
        Ok(())
    }
}
