//! Rule to disallow ID selectors.

use csslint_pipe_core::{Listener, Reporter, Rule, StartRule};

/// Rule id for ids.
pub const ID: &str = "ids";

/// Display name for ids.
pub const NAME: &str = "Disallow IDs in selectors";

/// Reports selectors that use `#id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ids;

impl Ids {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Ids {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Selectors should not contain IDs."
    }

    fn init(&self) -> Box<dyn Listener> {
        Box::new(IdsListener)
    }
}

struct IdsListener;

impl Listener for IdsListener {
    fn start_rule(&mut self, event: &StartRule, reporter: &mut Reporter<'_>) {
        for selector in &event.selectors {
            match count_ids(&selector.text) {
                0 => {}
                1 => reporter.warn("Don't use IDs in selectors.", selector.line, selector.col),
                n => reporter.warn(
                    format!("{n} IDs in the selector, really?"),
                    selector.line,
                    selector.col,
                ),
            }
        }
    }
}

/// Counts `#` modifiers outside attribute selectors and pseudo arguments.
fn count_ids(selector: &str) -> usize {
    let mut depth = 0usize;
    let mut count = 0;
    for c in selector.chars() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            '#' if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}
