//! Rule sets: the enabled/disabled + option state of every rule for one run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::types::{RuleMeta, Severity};

/// Rule value meaning "enabled, report as warning".
pub const ENABLED: i64 = 1;

/// Rule value meaning "enabled, report as error".
pub const ENABLED_AS_ERROR: i64 = 2;

/// Mapping from rule id to its configured value.
///
/// A rule absent from the set is disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, Value>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the catalogue baseline: every listed rule enabled with value `1`.
    #[must_use]
    pub fn all_enabled<'a, I>(catalog: I) -> Self
    where
        I: IntoIterator<Item = &'a RuleMeta>,
    {
        let rules = catalog
            .into_iter()
            .map(|meta| (meta.id.clone(), Value::from(ENABLED)))
            .collect();
        Self { rules }
    }

    /// Sets a rule value without the falsy check of [`RuleSet::merge`].
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<Value>) {
        self.rules.insert(id.into(), value.into());
    }

    /// Removes a rule, disabling it.
    pub fn remove(&mut self, id: &str) -> Option<Value> {
        self.rules.remove(id)
    }

    /// Returns the configured value of a rule.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.rules.get(id)
    }

    /// Returns true if the rule is present with a truthy value.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.rules.get(id).is_some_and(is_truthy)
    }

    /// Returns the severity the rule reports at: `2` means error, anything
    /// else truthy means warning.
    #[must_use]
    pub fn severity_of(&self, id: &str) -> Severity {
        match self.rules.get(id).and_then(Value::as_i64) {
            Some(ENABLED_AS_ERROR) => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Overlays `overrides` onto this set.
    ///
    /// Falsy values (`false`, `0`, `null`, `""`) remove the rule; any other
    /// value overwrites it.
    pub fn merge<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        for (id, value) in overrides {
            if is_truthy(value) {
                self.rules.insert(id.clone(), value.clone());
            } else {
                self.rules.remove(id);
            }
        }
    }

    /// Returns a fresh set: `self` with `overrides` merged on top.
    #[must_use]
    pub fn merged(&self, overrides: &Self) -> Self {
        let mut next = self.clone();
        next.merge(overrides.iter());
        next
    }

    /// Overlays another set without the falsy check, later values winning.
    pub fn extend(&mut self, other: Self) {
        self.rules.extend(other.rules);
    }

    /// Iterates over `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.rules.iter()
    }

    /// Returns the number of configured rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, Value)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// JavaScript-style truthiness for rule values.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
