//! Template formatters: formatter objects described as data.
//!
//! A template is a map with the keys of the formatter contract:
//!
//! ```toml
//! id = "github"
//! name = "GitHub annotations"
//! startFormat = ""
//! formatResults = "::{severity} file={path},line={line},col={col}::{message}\n"
//! endFormat = ""
//! ```
//!
//! `formatResults` is rendered once per message. Placeholders: `{path}`,
//! `{line}`, `{col}`, `{severity}`, `{message}`, `{rule}`, `{evidence}`.
//! Unknown placeholders are kept verbatim.

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::PluginError;
use crate::formatter::FormatterDescriptor;
use crate::types::Message;

/// Keys read from a template map.
const KEYS: [&str; 5] = ["id", "name", "startFormat", "formatResults", "endFormat"];

/// Builds a formatter descriptor from a template map.
///
/// Keys that are absent or not strings are left unset, so the returned
/// descriptor fails [`FormatterDescriptor::validate`] naming them.
#[must_use]
pub fn descriptor_from_map(map: &Map<String, Value>) -> FormatterDescriptor {
    let [id, name, start, results, end] = KEYS.map(|key| {
        map.get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string)
    });

    let mut descriptor = FormatterDescriptor::new();
    if let Some(id) = id {
        descriptor = descriptor.id(id);
    }
    if let Some(name) = name {
        descriptor = descriptor.name(name);
    }
    if let Some(start) = start {
        descriptor = descriptor.start_format(move || start.clone());
    }
    if let Some(results) = results {
        descriptor = descriptor.format_results(move |report, path, _| {
            report
                .messages
                .iter()
                .map(|message| render(&results, path, message))
                .collect()
        });
    }
    if let Some(end) = end {
        descriptor = descriptor.end_format(move || end.clone());
    }
    descriptor
}

/// Loads a template formatter module from disk.
///
/// Files ending in `.json` are read as JSON, anything else as TOML.
///
/// # Errors
///
/// Returns [`PluginError::FormatterModule`] if the file cannot be read or
/// parsed, or does not hold a map.
pub fn load_module(reference: &str) -> Result<FormatterDescriptor, PluginError> {
    let module_error = |message: String| PluginError::FormatterModule {
        module: reference.to_string(),
        message,
    };

    let path = Path::new(reference);
    let content = std::fs::read_to_string(path).map_err(|e| module_error(e.to_string()))?;

    let value: Value = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| module_error(e.to_string()))?
    } else {
        let table: toml::Table = toml::from_str(&content).map_err(|e| module_error(e.to_string()))?;
        serde_json::to_value(table).map_err(|e| module_error(e.to_string()))?
    };

    match value {
        Value::Object(map) => Ok(descriptor_from_map(&map)),
        _ => Err(module_error("module must contain a map".to_string())),
    }
}

/// Renders one message through a template in a single pass.
fn render(template: &str, path: &str, message: &Message) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match placeholder(key, path, message) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn placeholder(key: &str, path: &str, message: &Message) -> Option<String> {
    let value = match key {
        "path" => path.to_string(),
        "line" => message.line.map(|l| l.to_string()).unwrap_or_default(),
        "col" => message.col.map(|c| c.to_string()).unwrap_or_default(),
        "severity" => message.severity.to_string(),
        "message" => message.message.clone(),
        "rule" => message.rule.id.clone(),
        "evidence" => message.evidence.clone().unwrap_or_default(),
        _ => return None,
    };
    Some(value)
}
