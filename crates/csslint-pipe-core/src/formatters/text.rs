//! Human-readable text formatter.

use std::fmt::Write;

use crate::formatter::{FormatOptions, Formatter};
use crate::types::EngineReport;

/// The default formatter: a problem count followed by one block per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Formatter for Text {
    fn id(&self) -> &str {
        "text"
    }

    fn name(&self) -> &str {
        "Text"
    }

    fn format_results(&self, report: &EngineReport, path: &str, options: &FormatOptions) -> String {
        let messages = &report.messages;
        if messages.is_empty() {
            return if options.quiet {
                String::new()
            } else {
                format!("\n\ncsslint: No errors in {path}.")
            };
        }

        let mut output = if messages.len() == 1 {
            format!("\n\ncsslint: There is 1 problem in {path}.")
        } else {
            format!(
                "\n\ncsslint: There are {} problems in {path}.",
                messages.len()
            )
        };

        let short = short_name(path);
        for (i, message) in messages.iter().enumerate() {
            let _ = write!(output, "\n\n{short}\n{}: {}", i + 1, message.severity);
            if let (Some(line), Some(col)) = (message.line, message.col) {
                let _ = write!(output, " at line {line}, col {col}");
                let _ = write!(output, "\n{}", message.message);
                let _ = write!(output, "\n{}", message.evidence.as_deref().unwrap_or(""));
            } else {
                let _ = write!(output, "\n{}", message.message);
            }
        }

        output
    }
}

/// Strips the directory part of a path, accepting either separator.
fn short_name(path: &str) -> &str {
    path.rfind('/')
        .or_else(|| path.rfind('\\'))
        .map_or(path, |pos| &path[pos + 1..])
}
