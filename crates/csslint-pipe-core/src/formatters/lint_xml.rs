//! `<lint>` XML formatter.

use std::fmt::Write;

use super::{escape_xml, XML_DECLARATION};
use crate::formatter::{FormatOptions, Formatter};
use crate::types::EngineReport;

/// Lint XML: one `<issue>` per message, rollups included without position.
#[derive(Debug, Clone, Copy, Default)]
pub struct LintXml;

impl Formatter for LintXml {
    fn id(&self) -> &str {
        "lint-xml"
    }

    fn name(&self) -> &str {
        "Lint XML format"
    }

    fn start_format(&self) -> String {
        format!("{XML_DECLARATION}<lint>")
    }

    fn format_results(
        &self,
        report: &EngineReport,
        path: &str,
        _options: &FormatOptions,
    ) -> String {
        if report.messages.is_empty() {
            return String::new();
        }

        let mut output = format!("<file name=\"{}\">", escape_xml(path));
        for message in &report.messages {
            match (message.line, message.col) {
                (Some(line), Some(col)) => {
                    let _ = write!(
                        output,
                        "<issue line=\"{line}\" char=\"{col}\" severity=\"{}\" reason=\"{}\" evidence=\"{}\"/>",
                        message.severity,
                        escape_xml(&message.message),
                        escape_xml(message.evidence.as_deref().unwrap_or("")),
                    );
                }
                _ => {
                    let _ = write!(
                        output,
                        "<issue severity=\"{}\" reason=\"{}\" evidence=\"\"/>",
                        message.severity,
                        escape_xml(&message.message),
                    );
                }
            }
        }
        output.push_str("</file>");
        output
    }

    fn end_format(&self) -> String {
        "</lint>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::{important_report, rollup_report};

    #[test]
    fn renders_issue_with_evidence() {
        let out = LintXml.format_results(&important_report(), "a.css", &FormatOptions::default());
        assert_eq!(
            out,
            r#"<file name="a.css"><issue line="2" char="3" severity="warning" reason="Use of !important" evidence="  color: red !important;"/></file>"#
        );
    }

    #[test]
    fn renders_rollup_without_position() {
        let out = LintXml.format_results(&rollup_report(), "a.css", &FormatOptions::default());
        assert!(out.contains(
            r#"<issue severity="error" reason="Too many !important declarations (10)" evidence=""/>"#
        ));
    }
}
