//! # csslint-pipe-core
//!
//! Core types for linting CSS file records inside a build pipeline.
//!
//! This crate provides the contracts the pipeline stages are written
//! against. It includes:
//!
//! - [`LintEngine`] trait and the reference [`Engine`]
//! - [`Rule`] and [`Listener`] traits for event-driven rules
//! - [`Formatter`] trait with the built-in [`formatters`]
//! - [`RuleSet`] with the per-file merge semantics
//! - [`ConfigLoader`] for `.csslintrc` discovery
//! - [`FileRecord`] and the [`Report`] attached to it
//!
//! ## Example
//!
//! ```ignore
//! use csslint_pipe_core::{Engine, LintEngine, RuleSet};
//!
//! let engine = Engine::builder().rule(MyRule).build();
//! let rules = RuleSet::all_enabled(&engine.rules());
//!
//! let report = engine.verify("a { color: red !important; }", &rules);
//! for message in &report.messages {
//!     println!("{message}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod file;
mod formatter;
mod loader;
mod report;
mod rule;
mod ruleset;
mod scanner;
mod types;

/// Built-in formatters.
pub mod formatters;
/// Formatters described as data.
pub mod template;

pub use config::{parse_rc, read_rc, AnalyzerOptions, ConfigError, LOOKUP_KEY, RC_FILE_NAME};
pub use engine::{Engine, EngineBuilder, LintEngine};
pub use error::{PluginError, PLUGIN_NAME};
pub use file::{Contents, FileRecord, STDIN};
pub use formatter::{FormatOptions, Formatter, FormatterDescriptor, FormatterRef};
pub use loader::ConfigLoader;
pub use report::{Report, ReportEntry};
pub use rule::{InitFn, Listener, Reporter, Rule, RuleDescriptor, RuleRef};
pub use ruleset::{is_truthy, RuleSet, ENABLED, ENABLED_AS_ERROR};
pub use scanner::{scan, EndRule, Event, Property, Selector, StartRule};
pub use types::{EngineReport, Message, RuleMeta, Severity};
