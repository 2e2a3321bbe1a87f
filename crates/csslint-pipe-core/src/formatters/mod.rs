//! Built-in formatters registered with every engine.
//!
//! | Id | Output |
//! |----|--------|
//! | `text` | Human-readable, one block per message |
//! | `compact` | One line per message |
//! | `checkstyle-xml` | Checkstyle XML |
//! | `lint-xml` | `<lint>` XML |

mod checkstyle;
mod compact;
mod lint_xml;
mod text;

use std::sync::Arc;

pub use checkstyle::CheckstyleXml;
pub use compact::Compact;
pub use lint_xml::LintXml;
pub use text::Text;

use crate::formatter::FormatterRef;

/// XML declaration opening every XML formatter's output.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>";

/// Returns the built-in formatters.
#[must_use]
pub fn builtin_formatters() -> Vec<FormatterRef> {
    vec![
        Arc::new(Text),
        Arc::new(Compact),
        Arc::new(CheckstyleXml),
        Arc::new(LintXml),
    ]
}

/// Escapes text for use in an XML attribute.
#[must_use]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{EngineReport, Message, RuleMeta, Severity};

    pub fn important_report() -> EngineReport {
        EngineReport {
            messages: vec![Message {
                severity: Severity::Warning,
                line: Some(2),
                col: Some(3),
                message: "Use of !important".to_string(),
                evidence: Some("  color: red !important;".to_string()),
                rule: RuleMeta::new("important", "Disallow !important"),
            }],
        }
    }

    pub fn rollup_report() -> EngineReport {
        EngineReport {
            messages: vec![Message {
                severity: Severity::Error,
                line: None,
                col: None,
                message: "Too many !important declarations (10)".to_string(),
                evidence: None,
                rule: RuleMeta::new("important", "Disallow !important"),
            }],
        }
    }
}
