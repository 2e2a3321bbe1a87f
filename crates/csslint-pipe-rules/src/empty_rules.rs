//! Rule to disallow empty declaration blocks.

use csslint_pipe_core::{EndRule, Listener, Property, Reporter, Rule, StartRule};

/// Rule id for empty-rules.
pub const ID: &str = "empty-rules";

/// Display name for empty-rules.
pub const NAME: &str = "Disallow empty rules";

/// Reports rule blocks without declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRules;

impl EmptyRules {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for EmptyRules {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Rules without any properties specified should be removed."
    }

    fn init(&self) -> Box<dyn Listener> {
        Box::<EmptyRulesListener>::default()
    }
}

#[derive(Default)]
struct EmptyRulesListener {
    count: usize,
}

impl Listener for EmptyRulesListener {
    fn start_rule(&mut self, _event: &StartRule, _reporter: &mut Reporter<'_>) {
        self.count = 0;
    }

    fn property(&mut self, _event: &Property, _reporter: &mut Reporter<'_>) {
        self.count += 1;
    }

    fn end_rule(&mut self, event: &EndRule, reporter: &mut Reporter<'_>) {
        if self.count == 0 {
            reporter.warn("Rule is empty.", event.line, event.col);
        }
    }
}
