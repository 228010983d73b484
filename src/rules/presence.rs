//! Presence checks.

use crate::rules::{Fault, RuleError, RuleFn, RuleRegistry};

/// Fails on the kind's zero value: `required`
///
/// Empty strings, zero numbers, `false`, empty containers, records whose
/// fields are all zero, and absent optionals all count as missing.
pub const RULE_REQUIRED: RuleFn = |_kind, value, _title, _params| {
    if value.is_zero() {
        return Err(RuleError::Constraint(Fault::new("required")));
    }
    Ok(())
};

pub fn register_presence_rules(registry: &mut RuleRegistry) {
    registry.register("required", RULE_REQUIRED);
}
