//! Core types for engine diagnostics.

use serde::{Deserialize, Serialize};

/// Severity level for lint messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Returns the lowercase name used by the built-in formatters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Returns the capitalized name (`"Warning"`, `"Error"`).
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive metadata of a rule, attached to every message it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMeta {
    /// Rule identifier (e.g., "important").
    pub id: String,
    /// Display name (e.g., "Disallow !important").
    pub name: String,
    /// Brief description of what the rule checks.
    pub desc: String,
    /// Browsers the rule is relevant for.
    pub browsers: String,
}

impl RuleMeta {
    /// Creates rule metadata with an empty description, applicable to all browsers.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desc: String::new(),
            browsers: "All".to_string(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Sets the applicable browsers.
    #[must_use]
    pub fn with_browsers(mut self, browsers: impl Into<String>) -> Self {
        self.browsers = browsers.into();
        self
    }
}

/// A single diagnostic produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity of this message.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Line number (1-indexed). `None` for rollup messages.
    pub line: Option<usize>,
    /// Column number (1-indexed). `None` for rollup messages.
    pub col: Option<usize>,
    /// Human-readable message.
    pub message: String,
    /// Source line the message points at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Rule that produced the message.
    pub rule: RuleMeta,
}

impl Message {
    /// Returns true for stylesheet-wide messages that carry no position.
    #[must_use]
    pub fn is_rollup(&self) -> bool {
        self.line.is_none()
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.col) {
            (Some(line), Some(col)) => write!(
                f,
                "{line}:{col}: {} [{}] {}",
                self.severity, self.rule.id, self.message
            ),
            _ => write!(f, "{} [{}] {}", self.severity, self.rule.id, self.message),
        }
    }
}

/// Raw output of one engine run over one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Messages in the order the engine reported them.
    pub messages: Vec<Message>,
}

impl EngineReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the engine reported nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
