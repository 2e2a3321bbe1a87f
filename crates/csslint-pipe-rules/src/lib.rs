//! # csslint-pipe-rules
//!
//! Reference CSS lint rules for csslint-pipe.
//!
//! ## Available Rules
//!
//! | Id | Description |
//! |----|-------------|
//! | `important` | Reports `!important`, with a rollup at 10 or more |
//! | `duplicate-properties` | Reports properties repeated within a block |
//! | `empty-rules` | Reports blocks without declarations |
//! | `ids` | Reports `#id` selectors |
//! | `zero-units` | Reports units on zero values |
//!
//! ## Usage
//!
//! ```ignore
//! use csslint_pipe_core::Engine;
//! use csslint_pipe_rules::{all_rules, Important};
//!
//! let engine = Engine::builder().rules(all_rules()).build();
//! let only_important = Engine::builder().rule(Important::new()).build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod duplicate_properties;
mod empty_rules;
mod ids;
mod important;
mod presets;
mod zero_units;

pub use duplicate_properties::DuplicateProperties;
pub use empty_rules::EmptyRules;
pub use ids::Ids;
pub use important::Important;
pub use presets::all_rules;
pub use zero_units::ZeroUnits;

/// Re-export core types for convenience.
pub use csslint_pipe_core::{Rule, RuleRef, Severity};
