//! Errors surfaced by the pipeline stages and registries.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;

/// Identifier attached to every error delivered on a stream's error channel.
pub const PLUGIN_NAME: &str = "csslint-pipe";

/// Errors raised by stages (per file) or by construction and registration.
#[derive(Debug, Error, Diagnostic)]
pub enum PluginError {
    /// The file is backed by a live byte stream rather than buffered content.
    #[error("csslint-pipe: Streaming not supported")]
    #[diagnostic(code(csslint_pipe::streaming_unsupported))]
    StreamingUnsupported,

    /// The per-file configuration could not be resolved.
    #[error(transparent)]
    #[diagnostic(code(csslint_pipe::config))]
    ConfigResolution(#[from] ConfigError),

    /// The formatter argument has a type no formatter can be built from.
    #[error(
        "Invalid custom formatter passed ({found}), pass `null` to use the default formatter"
    )]
    #[diagnostic(code(csslint_pipe::invalid_formatter_argument))]
    InvalidFormatterArgument {
        /// Description of the rejected argument.
        found: String,
    },

    /// A formatter object lacks one of the required capabilities.
    #[error(
        "Invalid formatter: formatters need to be objects, and contain \"id\", \"name\", \"startFormat\", \"endFormat\" and \"formatResults\""
    )]
    #[diagnostic(code(csslint_pipe::invalid_formatter_shape))]
    InvalidFormatterShape {
        /// Names of the missing capabilities.
        missing: Vec<&'static str>,
    },

    /// No formatter is registered under the requested id.
    #[error("Invalid reporter: {0}")]
    #[diagnostic(code(csslint_pipe::invalid_formatter))]
    InvalidFormatter(String),

    /// A formatter module could not be read or parsed.
    #[error("Failed to load formatter module {module}: {message}")]
    #[diagnostic(code(csslint_pipe::formatter_module))]
    FormatterModule {
        /// Module reference as given by the caller.
        module: String,
        /// Underlying error message.
        message: String,
    },

    /// A rule descriptor is incomplete.
    #[error("Invalid rule: {0}")]
    #[diagnostic(code(csslint_pipe::invalid_rule))]
    InvalidRule(String),

    /// The fail stage saw a file with diagnostics.
    #[error("CSSLint failed for {relative}")]
    #[diagnostic(code(csslint_pipe::lint_failed))]
    LintFailed {
        /// Path of the offending file, relative to its base.
        relative: String,
    },
}

impl PluginError {
    /// Returns the identifier of the plugin that raised the error.
    #[must_use]
    pub fn plugin(&self) -> &'static str {
        PLUGIN_NAME
    }
}
