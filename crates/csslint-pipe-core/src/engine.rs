//! The lint engine contract and its reference implementation.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::formatter::FormatterRef;
use crate::formatters::builtin_formatters;
use crate::rule::{Reporter, Rule, RuleRef};
use crate::ruleset::RuleSet;
use crate::scanner::{scan, Event};
use crate::types::{EngineReport, RuleMeta};

/// The lint engine as seen by the pipeline stages.
///
/// Holds the rule catalogue and the formatter registry. Both are shared
/// state: registering through one handle is visible through every clone.
pub trait LintEngine: Send + Sync {
    /// Returns metadata of every registered rule, in registration order.
    fn rules(&self) -> Vec<RuleMeta>;

    /// Lints `text` with the rules enabled in `ruleset`.
    fn verify(&self, text: &str, ruleset: &RuleSet) -> EngineReport;

    /// Looks up a registered formatter.
    fn formatter(&self, id: &str) -> Option<FormatterRef>;

    /// Registers a rule, replacing any rule with the same id.
    fn add_rule(&self, rule: RuleRef);

    /// Registers a formatter, replacing any formatter with the same id.
    fn add_formatter(&self, formatter: FormatterRef);

    /// Returns true if a formatter is registered under `id`.
    fn has_format(&self, id: &str) -> bool {
        self.formatter(id).is_some()
    }

    /// Restores the catalogue the engine was built with.
    fn reset(&self);
}

#[derive(Clone, Default)]
struct Catalog {
    rules: Vec<RuleRef>,
    formatters: Vec<FormatterRef>,
}

impl Catalog {
    fn add_rule(&mut self, rule: RuleRef) {
        match self.rules.iter_mut().find(|r| r.id() == rule.id()) {
            Some(slot) => *slot = rule,
            None => self.rules.push(rule),
        }
    }

    fn add_formatter(&mut self, formatter: FormatterRef) {
        match self.formatters.iter_mut().find(|f| f.id() == formatter.id()) {
            Some(slot) => *slot = formatter,
            None => self.formatters.push(formatter),
        }
    }
}

/// Builder for configuring an [`Engine`].
pub struct EngineBuilder {
    catalog: Catalog,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Creates a builder with the built-in formatters and no rules.
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = Catalog::default();
        for formatter in builtin_formatters() {
            catalog.add_formatter(formatter);
        }
        Self { catalog }
    }

    /// Adds a rule to the baseline catalogue.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.catalog.add_rule(Arc::new(rule));
        self
    }

    /// Adds several shared rules to the baseline catalogue.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleRef>,
    {
        for rule in rules {
            self.catalog.add_rule(rule);
        }
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            state: Arc::new(RwLock::new(self.catalog.clone())),
            baseline: Arc::new(self.catalog),
        }
    }
}

/// Reference engine: scanner events dispatched to rule listeners.
///
/// Cloning yields another handle to the same registries.
#[derive(Clone)]
pub struct Engine {
    state: Arc<RwLock<Catalog>>,
    baseline: Arc<Catalog>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Engine {
    /// Creates a builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let catalog = self.read();
        f.debug_struct("Engine")
            .field("rules", &catalog.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .field(
                "formatters",
                &catalog.formatters.iter().map(|f| f.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LintEngine for Engine {
    fn rules(&self) -> Vec<RuleMeta> {
        self.read().rules.iter().map(|r| r.meta()).collect()
    }

    fn verify(&self, text: &str, ruleset: &RuleSet) -> EngineReport {
        let enabled: Vec<RuleRef> = self
            .read()
            .rules
            .iter()
            .filter(|rule| ruleset.is_enabled(rule.id()))
            .cloned()
            .collect();

        debug!("Verifying with {} enabled rules", enabled.len());

        let events = scan(text);
        let lines: Vec<&str> = text.split('\n').collect();
        let mut messages = Vec::new();

        for rule in &enabled {
            let meta = rule.meta();
            let options = ruleset.get(rule.id()).cloned().unwrap_or_default();
            let severity = ruleset.severity_of(rule.id());
            let mut reporter = Reporter::new(&lines, &meta, &options, severity, &mut messages);
            let mut listener = rule.init();

            for event in &events {
                match event {
                    Event::StartStylesheet => listener.start_stylesheet(&mut reporter),
                    Event::StartRule(e) => listener.start_rule(e, &mut reporter),
                    Event::Property(e) => listener.property(e, &mut reporter),
                    Event::EndRule(e) => listener.end_rule(e, &mut reporter),
                    Event::EndStylesheet => listener.end_stylesheet(&mut reporter),
                }
            }
        }

        // positioned messages by line, rollups last
        messages.sort_by_key(|m| (m.is_rollup(), m.line));
        EngineReport { messages }
    }

    fn formatter(&self, id: &str) -> Option<FormatterRef> {
        self.read()
            .formatters
            .iter()
            .find(|f| f.id() == id)
            .cloned()
    }

    fn add_rule(&self, rule: RuleRef) {
        debug!("Registering rule: {}", rule.id());
        self.write().add_rule(rule);
    }

    fn add_formatter(&self, formatter: FormatterRef) {
        debug!("Registering formatter: {}", formatter.id());
        self.write().add_formatter(formatter);
    }

    fn reset(&self) {
        *self.write() = (*self.baseline).clone();
    }
}
