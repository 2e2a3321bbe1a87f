//! # csslint-pipe
//!
//! Build-pipeline adapter that lints CSS file records and renders the
//! diagnostics.
//!
//! This is the main facade crate that re-exports core functionality and
//! rules, and provides the pipeline stages:
//!
//! - [`AnalyzerStage`] resolves each file's configuration, lints it and
//!   attaches a [`Report`]
//! - [`FormatterStage`] renders failed reports through a formatter, or fails
//!   the pipeline (`"fail"`)
//! - [`add_rule`] and [`add_formatter`] extend the engine's registries
//!
//! ## Configuration
//!
//! Every file is linted with the full rule catalogue, overlaid with the
//! caller options and then with the nearest `.csslintrc` above the file:
//!
//! ```json
//! { "important": false, "ids": 2 }
//! ```
//!
//! A falsy value disables the rule, `2` reports it as an error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use csslint_pipe::{run, AnalyzerOptions, AnalyzerStage, FormatterOptions, FormatterStage};
//!
//! let engine = csslint_pipe::engine();
//! let mut analyzer = AnalyzerStage::new(engine.clone(), AnalyzerOptions::None);
//! let options = FormatterOptions::default();
//! let mut reporter = FormatterStage::new(engine.as_ref(), "compact", options)?;
//! let mut fail = FormatterStage::new(engine.as_ref(), "fail", FormatterOptions::default())?;
//!
//! let output = run(&mut analyzer, files)
//!     .await
//!     .pipe(&mut reporter)
//!     .await
//!     .pipe(&mut fail)
//!     .await;
//! ```

#![forbid(unsafe_code)]

use std::sync::{Arc, OnceLock};

// Re-export core types and traits
pub use csslint_pipe_core::*;

/// Reference rules and presets.
pub mod rules {
    pub use csslint_pipe_rules::*;
}

mod analyzer;
mod fail;
mod registry;
mod reporter;
mod stream;

pub use analyzer::AnalyzerStage;
pub use fail::FailStage;
pub use registry::{add_formatter, add_rule, FormatterSource};
pub use reporter::{
    FormatFn, FormatterArg, FormatterOptions, FormatterStage, Logger, RenderStage,
    DEFAULT_FORMATTER, FAIL_FORMATTER,
};
pub use stream::{run, StreamOutput, Transform};

static ENGINE: OnceLock<Arc<Engine>> = OnceLock::new();

/// Returns the process-wide engine, seeded with every reference rule.
///
/// Registrations through this handle are visible to every stage built from
/// it afterwards. Call [`LintEngine::reset`] to restore the seed.
pub fn engine() -> Arc<dyn LintEngine> {
    ENGINE.get_or_init(|| Arc::new(default_engine())).clone()
}

/// Builds a standalone engine seeded with every reference rule.
#[must_use]
pub fn default_engine() -> Engine {
    Engine::builder().rules(rules::all_rules()).build()
}

/// Creates an analyzer stage on the process-wide engine.
pub fn analyzer(options: impl Into<AnalyzerOptions>) -> AnalyzerStage {
    AnalyzerStage::new(engine(), options)
}

/// Creates a formatter stage on the process-wide engine.
///
/// # Errors
///
/// See [`FormatterStage::new`].
pub fn reporter(
    arg: impl Into<FormatterArg>,
    options: FormatterOptions,
) -> Result<FormatterStage, PluginError> {
    FormatterStage::new(engine().as_ref(), arg, options)
}

/// Creates the fail stage.
#[must_use]
pub fn fail_reporter() -> FailStage {
    FailStage::new()
}
