//! Rule to disallow `!important` declarations.
//!
//! Every `!important` is reported where it occurs. A stylesheet with
//! [`THRESHOLD`] or more of them additionally gets a rollup message.

use csslint_pipe_core::{Listener, Property, Reporter, Rule};

/// Rule id for important.
pub const ID: &str = "important";

/// Display name for important.
pub const NAME: &str = "Disallow !important";

/// Number of `!important` declarations that triggers the rollup.
pub const THRESHOLD: usize = 10;

/// Reports uses of `!important`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Important;

impl Important {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Important {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Be careful when using !important declaration"
    }

    fn init(&self) -> Box<dyn Listener> {
        Box::<ImportantListener>::default()
    }
}

#[derive(Default)]
struct ImportantListener {
    count: usize,
}

impl Listener for ImportantListener {
    fn property(&mut self, event: &Property, reporter: &mut Reporter<'_>) {
        if event.important {
            self.count += 1;
            reporter.warn("Use of !important", event.line, event.col);
        }
    }

    fn end_stylesheet(&mut self, reporter: &mut Reporter<'_>) {
        if self.count >= THRESHOLD {
            reporter.rollup_warn(format!(
                "Too many !important declarations ({}), try to use less than {THRESHOLD} to avoid specificity issues.",
                self.count
            ));
        }
    }
}
