//! One-line-per-message formatter.

use std::fmt::Write;

use crate::formatter::{FormatOptions, Formatter};
use crate::types::EngineReport;

/// Compact format: `path: line L, col C, Warning - message (rule)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compact;

impl Formatter for Compact {
    fn id(&self) -> &str {
        "compact"
    }

    fn name(&self) -> &str {
        "Compact, 'porcelain' format"
    }

    fn format_results(&self, report: &EngineReport, path: &str, options: &FormatOptions) -> String {
        if report.messages.is_empty() {
            return if options.quiet {
                String::new()
            } else {
                format!("{path}: Lint Free!")
            };
        }

        let mut output = String::new();
        for message in &report.messages {
            let _ = write!(output, "{path}: ");
            if let (Some(line), Some(col)) = (message.line, message.col) {
                let _ = write!(output, "line {line}, col {col}, ");
            }
            let _ = writeln!(
                output,
                "{} - {} ({})",
                message.severity.title(),
                message.message,
                message.rule.id
            );
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::{important_report, rollup_report};

    #[test]
    fn renders_positioned_message() {
        let out = Compact.format_results(&important_report(), "a.css", &FormatOptions::default());
        assert_eq!(
            out,
            "a.css: line 2, col 3, Warning - Use of !important (important)\n"
        );
    }

    #[test]
    fn renders_rollup_message() {
        let out = Compact.format_results(&rollup_report(), "a.css", &FormatOptions::default());
        assert_eq!(
            out,
            "a.css: Error - Too many !important declarations (10) (important)\n"
        );
    }

    #[test]
    fn clean_report_is_lint_free() {
        let out = Compact.format_results(&EngineReport::new(), "a.css", &FormatOptions::default());
        assert_eq!(out, "a.css: Lint Free!");
    }
}
