//! Checkstyle XML formatter.

use std::fmt::Write;

use super::{escape_xml, XML_DECLARATION};
use crate::formatter::{FormatOptions, Formatter};
use crate::types::{EngineReport, RuleMeta};

/// Checkstyle XML, consumable by CI dashboards.
///
/// Rollup messages carry no position and are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckstyleXml;

impl Formatter for CheckstyleXml {
    fn id(&self) -> &str {
        "checkstyle-xml"
    }

    fn name(&self) -> &str {
        "Checkstyle XML format"
    }

    fn start_format(&self) -> String {
        format!("{XML_DECLARATION}<checkstyle>")
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
        for message in report.messages.iter().filter(|m| !m.is_rollup()) {
            let _ = write!(
                output,
                "<error line=\"{}\" column=\"{}\" severity=\"{}\" message=\"{}\" source=\"{}\"/>",
                message.line.unwrap_or_default(),
                message.col.unwrap_or_default(),
                message.severity,
                escape_xml(&message.message),
                source_of(&message.rule),
            );
        }
        output.push_str("</file>");
        output
    }

    fn end_format(&self) -> String {
        "</checkstyle>".to_string()
    }
}

/// Checkstyle source attribute: `net.csslint.` + rule name without whitespace.
fn source_of(rule: &RuleMeta) -> String {
    let name: String = rule.name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("net.csslint.{}", escape_xml(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::{important_report, rollup_report};

    #[test]
    fn wraps_document() {
        assert_eq!(
            CheckstyleXml.start_format(),
            r#"<?xml version="1.0" encoding="utf-8"?><checkstyle>"#
        );
        assert_eq!(CheckstyleXml.end_format(), "</checkstyle>");
    }

    #[test]
    fn renders_error_element() {
        let out = CheckstyleXml.format_results(
            &important_report(),
            "a.css",
            &FormatOptions::default(),
        );
        assert_eq!(
            out,
            r#"<file name="a.css"><error line="2" column="3" severity="warning" message="Use of !important" source="net.csslint.Disallow!important"/></file>"#
        );
    }

    #[test]
    fn skips_rollups() {
        let out =
            CheckstyleXml.format_results(&rollup_report(), "a.css", &FormatOptions::default());
        assert_eq!(out, r#"<file name="a.css"></file>"#);
    }

    #[test]
    fn clean_report_renders_nothing() {
        let out =
            CheckstyleXml.format_results(&EngineReport::new(), "a.css", &FormatOptions::default());
        assert!(out.is_empty());
    }
}
