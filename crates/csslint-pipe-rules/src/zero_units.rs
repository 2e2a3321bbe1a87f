//! Rule to disallow units on zero values.
//!
//! `0px`, `0em` and `0%` are reported. Times (`0s`, `0ms`) are not, since a
//! unitless zero is invalid there.
//!
//! Configured with an object, the rule skips the units listed under `allow`:
//!
//! ```json
//! { "zero-units": { "allow": ["%"] } }
//! ```

use csslint_pipe_core::{Listener, Property, Reporter, Rule};

/// Rule id for zero-units.
pub const ID: &str = "zero-units";

/// Display name for zero-units.
pub const NAME: &str = "Disallow units for 0 values";

const TIME_UNITS: &[&str] = &["s", "ms"];

/// Reports zero lengths written with a unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroUnits;

impl ZeroUnits {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ZeroUnits {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "You don't need to specify units when a value is 0."
    }

    fn init(&self) -> Box<dyn Listener> {
        Box::new(ZeroUnitsListener)
    }
}

struct ZeroUnitsListener;

impl Listener for ZeroUnitsListener {
    fn property(&mut self, event: &Property, reporter: &mut Reporter<'_>) {
        let count = {
            let allowed: Vec<&str> = reporter
                .options()
                .get("allow")
                .and_then(|allow| allow.as_array())
                .map(|units| units.iter().filter_map(|unit| unit.as_str()).collect())
                .unwrap_or_default();

            event
                .value
                .split(|c: char| c.is_whitespace() || matches!(c, ',' | '/' | '(' | ')'))
                .filter_map(zero_unit)
                .filter(|unit| !allowed.iter().any(|a| a.eq_ignore_ascii_case(unit)))
                .count()
        };

        for _ in 0..count {
            reporter.warn(
                "Values of 0 shouldn't have units specified.",
                event.line,
                event.col,
            );
        }
    }
}

/// Returns the unit of a zero value written with one.
fn zero_unit(part: &str) -> Option<&str> {
    let unsigned = part.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(part);
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(unsigned.len());
    let (number, unit) = unsigned.split_at(split);

    if number.is_empty() || !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !number.chars().all(|c| c == '0' || c == '.') || number.matches('.').count() > 1 {
        return None;
    }

    let is_unit =
        unit == "%" || (!unit.is_empty() && unit.chars().all(|c| c.is_ascii_alphabetic()));
    let is_time = TIME_UNITS.iter().any(|t| unit.eq_ignore_ascii_case(t));
    (is_unit && !is_time).then_some(unit)
}
