//! Rule to disallow duplicate properties within a block.
//!
//! A repeated property is allowed only when it directly follows the previous
//! declaration of the same name with a different value, which is the usual
//! fallback pattern:
//!
//! ```css
//! .a { background: #fff; background: rgba(255, 255, 255, 0.5); }
//! ```

use std::collections::HashMap;

use csslint_pipe_core::{Listener, Property, Reporter, Rule, StartRule};

/// Rule id for duplicate-properties.
pub const ID: &str = "duplicate-properties";

/// Display name for duplicate-properties.
pub const NAME: &str = "Disallow duplicate properties";

/// Reports properties declared twice in one block.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateProperties;

impl DuplicateProperties {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DuplicateProperties {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Duplicate properties must appear one after the other."
    }

    fn init(&self) -> Box<dyn Listener> {
        Box::<DuplicateListener>::default()
    }
}

#[derive(Default)]
struct DuplicateListener {
    seen: HashMap<String, String>,
    last: Option<String>,
}

impl Listener for DuplicateListener {
    fn start_rule(&mut self, _event: &StartRule, _reporter: &mut Reporter<'_>) {
        self.seen.clear();
        self.last = None;
    }

    fn property(&mut self, event: &Property, reporter: &mut Reporter<'_>) {
        let name = event.name.to_ascii_lowercase();

        if let Some(previous) = self.seen.get(&name) {
            if self.last.as_deref() != Some(name.as_str()) || *previous == event.value {
                reporter.warn(
                    format!("Duplicate property '{}' found.", event.name),
                    event.line,
                    event.col,
                );
            }
        }

        self.seen.insert(name.clone(), event.value.clone());
        self.last = Some(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csslint_pipe_core::{Engine, EngineReport, LintEngine, RuleSet};

    fn check_css(css: &str) -> EngineReport {
        let engine = Engine::builder().rule(DuplicateProperties::new()).build();
        engine.verify(css, &RuleSet::all_enabled(&engine.rules()))
    }

    #[test]
    fn detects_separated_duplicates() {
        let report = check_css(".a {\n  float: left;\n  color: red;\n  float: right;\n}");
        assert_eq!(report.messages.len(), 1);
        assert_eq!(report.messages[0].message, "Duplicate property 'float' found.");
        assert_eq!(report.messages[0].line, Some(4));
    }

    #[test]
    fn detects_adjacent_identical_values() {
        let report = check_css(".a { color: red; color: red; }");
        assert_eq!(report.messages.len(), 1);
    }

    #[test]
    fn allows_adjacent_fallbacks() {
        let report = check_css(".a { background: #fff; background: rgba(0, 0, 0, 0.5); }");
        assert!(report.is_empty());
    }

    #[test]
    fn blocks_are_independent() {
        let report = check_css(".a { color: red; } .b { color: red; }");
        assert!(report.is_empty());
    }
}
