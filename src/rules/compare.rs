//! Comparison checks.
//!
//! Each check passes when the named condition holds between the value's
//! magnitude and the single parameter. Strings compare by code point count,
//! except `eq`, which compares string content.

use std::cmp::Ordering;

use crate::rules::helpers::{category, measure, one_param, parse_bound};
use crate::rules::{Fault, RuleError, RuleFn, RuleRegistry, RuleResult};
use crate::value::{Kind, Value};

/// Strictly less than the bound: `lt=10`
pub const RULE_LT: RuleFn = |kind, value, _title, params| {
    compare(kind, value, params, "lt", "lt", "max", |o| o == Ordering::Less)
};

/// At most the bound: `lte=10`
pub const RULE_LTE: RuleFn = |kind, value, _title, params| {
    compare(kind, value, params, "lte", "lte", "max", |o| {
        o != Ordering::Greater
    })
};

/// Strictly greater than the bound: `gt=10`
pub const RULE_GT: RuleFn = |kind, value, _title, params| {
    compare(kind, value, params, "gt", "gt", "min", |o| {
        o == Ordering::Greater
    })
};

/// At least the bound: `gte=10`
pub const RULE_GTE: RuleFn = |kind, value, _title, params| {
    compare(kind, value, params, "gte", "gte", "min", |o| o != Ordering::Less)
};

/// Equal to the bound; string content, numeric value, or container length: `eq=x`
pub const RULE_EQ: RuleFn = |kind, value, _title, params| {
    let param = one_param("eq", params)?;
    if let Value::Str(s) = value {
        if s.as_str() == param {
            return Ok(());
        }
        return Err(RuleError::Constraint(Fault::new("eq").arg("min", param)));
    }
    let Some(measured) = measure(value) else {
        return Err(RuleError::Unsupported(kind));
    };
    let bound = parse_bound("eq", measured, param)?;
    if measured.compare(bound) == Some(Ordering::Equal) {
        Ok(())
    } else {
        Err(RuleError::Constraint(
            Fault::new(format!("{}.eq", category(kind))).arg("min", param),
        ))
    }
};

fn compare(
    kind: Kind,
    value: &Value,
    params: &[&str],
    rule: &str,
    outcome: &str,
    bound_arg: &'static str,
    accept: fn(Ordering) -> bool,
) -> RuleResult {
    let param = one_param(rule, params)?;
    let Some(measured) = measure(value) else {
        return Err(RuleError::Unsupported(kind));
    };
    let bound = parse_bound(rule, measured, param)?;
    match measured.compare(bound) {
        Some(ordering) if accept(ordering) => Ok(()),
        // NaN never satisfies a comparison.
        _ => Err(RuleError::Constraint(
            Fault::new(format!("{}.{}", category(kind), outcome)).arg(bound_arg, param),
        )),
    }
}

/// `min` and `max` alias the inclusive bounds.
pub fn register_compare_rules(registry: &mut RuleRegistry) {
    registry.register("eq", RULE_EQ);
    registry.register("lt", RULE_LT);
    registry.register("lte", RULE_LTE);
    registry.register("gt", RULE_GT);
    registry.register("gte", RULE_GTE);
    registry.register("min", RULE_GTE);
    registry.register("max", RULE_LTE);
}
