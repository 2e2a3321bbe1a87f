//! The reference rule set.

use std::sync::Arc;

use crate::{DuplicateProperties, EmptyRules, Ids, Important, ZeroUnits};
use csslint_pipe_core::RuleRef;

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleRef> {
    vec![
        Arc::new(Important::new()),
        Arc::new(DuplicateProperties::new()),
        Arc::new(EmptyRules::new()),
        Arc::new(Ids::new()),
        Arc::new(ZeroUnits::new()),
    ]
}
