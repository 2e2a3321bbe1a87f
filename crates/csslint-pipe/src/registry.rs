//! Rule and formatter registration.

use tracing::info;

use csslint_pipe_core::template::load_module;
use csslint_pipe_core::{FormatterDescriptor, LintEngine, PluginError, RuleDescriptor};

/// Where a formatter to register comes from.
#[derive(Debug)]
pub enum FormatterSource {
    /// A formatter object built in code.
    Descriptor(FormatterDescriptor),
    /// Path to a template formatter module (TOML, or JSON by extension).
    Module(String),
}

impl From<FormatterDescriptor> for FormatterSource {
    fn from(descriptor: FormatterDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<&str> for FormatterSource {
    fn from(module: &str) -> Self {
        Self::Module(module.to_string())
    }
}

impl From<String> for FormatterSource {
    fn from(module: String) -> Self {
        Self::Module(module)
    }
}

/// Registers a rule with the engine.
///
/// Only analyzer stages constructed afterwards see the rule.
///
/// # Errors
///
/// Returns [`PluginError::InvalidRule`] if the descriptor lacks an id, a
/// name or an init capability.
pub fn add_rule(engine: &dyn LintEngine, rule: RuleDescriptor) -> Result<(), PluginError> {
    let rule = rule.into_rule()?;
    info!("Adding rule: {}", rule.id());
    engine.add_rule(rule);
    Ok(())
}

/// Registers a formatter with the engine's registry.
///
/// # Errors
///
/// Returns [`PluginError::FormatterModule`] if a module cannot be loaded and
/// [`PluginError::InvalidFormatterShape`] if the formatter is incomplete.
pub fn add_formatter(
    engine: &dyn LintEngine,
    source: impl Into<FormatterSource>,
) -> Result<(), PluginError> {
    let descriptor = match source.into() {
        FormatterSource::Descriptor(descriptor) => descriptor,
        FormatterSource::Module(module) => load_module(&module)?,
    };
    let formatter = descriptor.validate()?;
    info!("Adding formatter: {}", formatter.id());
    engine.add_formatter(formatter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csslint_pipe_core::{Engine, Listener};

    struct Silent;

    impl Listener for Silent {}

    #[test]
    fn rule_without_init_is_rejected() {
        let engine = Engine::default();
        let err = add_rule(&engine, RuleDescriptor::new("silent").name("Silent")).unwrap_err();
        assert!(matches!(err, PluginError::InvalidRule(_)));
        assert!(engine.rules().is_empty());
    }

    #[test]
    fn complete_rule_is_registered() {
        let engine = Engine::default();
        let rule = RuleDescriptor::new("silent")
            .name("Silent")
            .init(|| Box::new(Silent));
        add_rule(&engine, rule).unwrap();
        assert_eq!(engine.rules()[0].id, "silent");
    }

    #[test]
    fn incomplete_formatter_is_rejected() {
        let engine = Engine::default();
        let err = add_formatter(&engine, FormatterDescriptor::new().id("x").name("X")).unwrap_err();
        assert!(matches!(err, PluginError::InvalidFormatterShape { .. }));
        assert!(!engine.has_format("x"));
    }

    #[test]
    fn missing_module_is_a_module_error() {
        let err = add_formatter(&Engine::default(), "/nonexistent/formatter.toml").unwrap_err();
        assert!(matches!(err, PluginError::FormatterModule { .. }));
    }
}
