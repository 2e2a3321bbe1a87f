//! Rule traits for defining lint rules.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::PluginError;
use crate::scanner::{EndRule, Property, StartRule};
use crate::types::{Message, RuleMeta, Severity};

/// Receives scanner events for one stylesheet.
///
/// A rule's [`Rule::init`] returns a fresh listener per lint run, so any
/// state kept on the listener is scoped to one file.
pub trait Listener {
    /// Called once before any other event.
    fn start_stylesheet(&mut self, _reporter: &mut Reporter<'_>) {}

    /// Called when a declaration block opens.
    fn start_rule(&mut self, _event: &StartRule, _reporter: &mut Reporter<'_>) {}

    /// Called for every declaration in the current block.
    fn property(&mut self, _event: &Property, _reporter: &mut Reporter<'_>) {}

    /// Called when a declaration block closes.
    fn end_rule(&mut self, _event: &EndRule, _reporter: &mut Reporter<'_>) {}

    /// Called once after every other event.
    fn end_stylesheet(&mut self, _reporter: &mut Reporter<'_>) {}
}

/// A lint rule the engine can apply to CSS text.
///
/// # Example
///
/// ```ignore
/// use csslint_pipe_core::{Listener, Property, Reporter, Rule};
///
/// pub struct NoColorRed;
///
/// impl Rule for NoColorRed {
///     fn id(&self) -> &str { "no-color-red" }
///     fn name(&self) -> &str { "Disallow red" }
///
///     fn init(&self) -> Box<dyn Listener> {
///         Box::new(NoColorRedListener)
///     }
/// }
///
/// struct NoColorRedListener;
///
/// impl Listener for NoColorRedListener {
///     fn property(&mut self, event: &Property, reporter: &mut Reporter<'_>) {
///         if event.value == "red" {
///             reporter.warn("Red is not allowed.", event.line, event.col);
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the rule identifier used in rule sets (e.g., "important").
    fn id(&self) -> &str;

    /// Returns the display name (e.g., "Disallow !important").
    fn name(&self) -> &str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the browsers this rule is relevant for.
    fn browsers(&self) -> &str {
        "All"
    }

    /// Creates the listener that checks one stylesheet.
    fn init(&self) -> Box<dyn Listener>;

    /// Returns the metadata attached to this rule's messages.
    fn meta(&self) -> RuleMeta {
        RuleMeta::new(self.id(), self.name())
            .with_desc(self.description())
            .with_browsers(self.browsers())
    }
}

/// Type alias for shared Rule trait objects.
pub type RuleRef = Arc<dyn Rule>;

/// Collects the messages of one rule during one lint run.
pub struct Reporter<'a> {
    lines: &'a [&'a str],
    meta: &'a RuleMeta,
    options: &'a Value,
    severity: Severity,
    messages: &'a mut Vec<Message>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter for one rule.
    ///
    /// `severity` is what [`Reporter::warn`] reports at; it follows the
    /// rule's configured value.
    #[must_use]
    pub fn new(
        lines: &'a [&'a str],
        meta: &'a RuleMeta,
        options: &'a Value,
        severity: Severity,
        messages: &'a mut Vec<Message>,
    ) -> Self {
        Self {
            lines,
            meta,
            options,
            severity,
            messages,
        }
    }

    /// Returns the value the rule is configured with (`1`, `2`, or an option).
    #[must_use]
    pub fn options(&self) -> &Value {
        self.options
    }

    /// Reports a finding at the rule's configured severity.
    pub fn warn(&mut self, message: impl Into<String>, line: usize, col: usize) {
        self.push(self.severity, message.into(), Some((line, col)));
    }

    /// Reports a finding as an error regardless of configuration.
    pub fn error(&mut self, message: impl Into<String>, line: usize, col: usize) {
        self.push(Severity::Error, message.into(), Some((line, col)));
    }

    /// Reports a stylesheet-wide finding at the rule's configured severity.
    pub fn rollup_warn(&mut self, message: impl Into<String>) {
        self.push(self.severity, message.into(), None);
    }

    /// Reports a stylesheet-wide finding as an error.
    pub fn rollup_error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into(), None);
    }

    fn push(&mut self, severity: Severity, message: String, position: Option<(usize, usize)>) {
        let evidence = position
            .and_then(|(line, _)| line.checked_sub(1))
            .and_then(|index| self.lines.get(index))
            .map(|line| line.trim_end_matches('\r').to_string());

        self.messages.push(Message {
            severity,
            line: position.map(|(line, _)| line),
            col: position.map(|(_, col)| col),
            message,
            evidence,
            rule: self.meta.clone(),
        });
    }
}

/// Initialization capability of a dynamically described rule.
pub type InitFn = Arc<dyn Fn() -> Box<dyn Listener> + Send + Sync>;

/// A rule assembled at runtime, validated when registered.
///
/// # Example
///
/// ```ignore
/// let oocss = RuleDescriptor::new("oocss")
///     .name("OOCSS")
///     .desc("Class names must follow pattern")
///     .init(|| Box::new(OocssListener));
/// csslint_pipe::add_rule(&engine, oocss)?;
/// ```
#[derive(Clone, Default)]
pub struct RuleDescriptor {
    id: Option<String>,
    name: Option<String>,
    desc: Option<String>,
    browsers: Option<String>,
    init: Option<InitFn>,
}

impl RuleDescriptor {
    /// Starts a descriptor for the given rule id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Sets the applicable browsers.
    #[must_use]
    pub fn browsers(mut self, browsers: impl Into<String>) -> Self {
        self.browsers = Some(browsers.into());
        self
    }

    /// Sets the initialization capability.
    #[must_use]
    pub fn init<F>(mut self, init: F) -> Self
    where
        F: Fn() -> Box<dyn Listener> + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }

    /// Validates the descriptor and turns it into a rule.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::InvalidRule`] if the id, name or init
    /// capability is missing, or the id contains whitespace.
    pub fn into_rule(self) -> Result<RuleRef, PluginError> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| PluginError::InvalidRule("rules need a non-empty \"id\"".into()))?;
        if id.chars().any(char::is_whitespace) {
            return Err(PluginError::InvalidRule(format!(
                "rule id `{id}` must not contain whitespace"
            )));
        }
        let name = self
            .name
            .ok_or_else(|| PluginError::InvalidRule(format!("rule `{id}` needs a \"name\"")))?;
        let init = self
            .init
            .ok_or_else(|| PluginError::InvalidRule(format!("rule `{id}` needs an \"init\"")))?;

        Ok(Arc::new(DescribedRule {
            id,
            name,
            desc: self.desc.unwrap_or_default(),
            browsers: self.browsers.unwrap_or_else(|| "All".to_string()),
            init,
        }))
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("desc", &self.desc)
            .field("browsers", &self.browsers)
            .field("init", &self.init.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

struct DescribedRule {
    id: String,
    name: String,
    desc: String,
    browsers: String,
    init: InitFn,
}

impl Rule for DescribedRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.desc
    }

    fn browsers(&self) -> &str {
        &self.browsers
    }

    fn init(&self) -> Box<dyn Listener> {
        (self.init)()
    }
}
