//! Normalized per-file lint report.

use serde::{Deserialize, Serialize};

use crate::ruleset::RuleSet;
use crate::types::{EngineReport, Message};

/// One diagnostic paired with the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// File path, or `"stdin"`.
    pub file: String,
    /// The engine message.
    pub error: Message,
}

/// The report the analyzer attaches to a file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// True iff the engine reported no messages.
    pub success: bool,
    /// Number of messages.
    pub error_count: usize,
    /// Raw engine output.
    pub original: EngineReport,
    /// Per-message entries; `None` when successful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ReportEntry>>,
    /// Effective rule set of the run; `None` when successful.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<RuleSet>,
}

impl Report {
    /// Builds a report from raw engine output.
    #[must_use]
    pub fn new(original: EngineReport, path: &str, options: &RuleSet) -> Self {
        if original.is_empty() {
            return Self {
                success: true,
                error_count: 0,
                original,
                results: None,
                options: None,
            };
        }

        let results: Vec<ReportEntry> = original
            .messages
            .iter()
            .map(|message| ReportEntry {
                file: path.to_string(),
                error: message.clone(),
            })
            .collect();

        Self {
            success: false,
            error_count: results.len(),
            original,
            results: Some(results),
            options: Some(options.clone()),
        }
    }

    /// Returns the raw engine messages.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.original.messages
    }
}
