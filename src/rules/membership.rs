//! Membership and uniqueness checks.

use crate::rules::helpers::{count_mismatch, parse_mismatch, parse_value_as};
use crate::rules::{Fault, RuleError, RuleFn, RuleRegistry};
use crate::value::{Kind, Value};

/// Every candidate must be one of the literal set: `in=a,b,c`
///
/// Scalars test their own value; sequences and maps test every element and
/// fail outright when empty. Parameters are coerced into the element kind
/// before comparison, so `in=1,20,01` admits the int `1`.
pub const RULE_IN: RuleFn = |kind, value, _title, params| {
    if params.is_empty() {
        return Err(count_mismatch("in", "1 or more", 0));
    }
    let (candidates, elem_kind): (Vec<&Value>, Kind) = match value {
        Value::Seq(items) => {
            if items.is_empty() {
                return Err(RuleError::Constraint(Fault::new("in.empty")));
            }
            (items.iter().collect(), items[0].kind())
        }
        Value::Map(entries) => {
            let values: Vec<&Value> = entries.values().collect();
            match values.first() {
                Some(first) => {
                    let elem_kind = first.kind();
                    (values, elem_kind)
                }
                None => return Err(RuleError::Constraint(Fault::new("in.empty"))),
            }
        }
        Value::Str(_) | Value::Int(_) | Value::Uint(_) | Value::Float(_) | Value::Bool(_) => {
            (vec![value], kind)
        }
        _ => return Err(RuleError::Unsupported(kind)),
    };
    if !matches!(
        elem_kind,
        Kind::Str | Kind::Int | Kind::Uint | Kind::Float | Kind::Bool
    ) {
        return Err(RuleError::Unsupported(elem_kind));
    }
    let mut set = Vec::with_capacity(params.len());
    for param in params {
        let Some(allowed) = parse_value_as(elem_kind, param) else {
            return Err(parse_mismatch("in", param, elem_kind.name()));
        };
        set.push(allowed);
    }
    for candidate in candidates {
        if !set.iter().any(|allowed| allowed == candidate) {
            return Err(RuleError::Constraint(
                Fault::new("in")
                    .arg("set", params.join(","))
                    .arg("value", candidate),
            ));
        }
    }
    Ok(())
};

/// Elements must be pairwise distinct: `unique`
///
/// Applies to sequences and to map values. An empty container passes.
pub const RULE_UNIQUE: RuleFn = |kind, value, _title, _params| {
    let elements: Vec<&Value> = match value {
        Value::Seq(items) => items.iter().collect(),
        Value::Map(entries) => entries.values().collect(),
        _ => return Err(RuleError::Unsupported(kind)),
    };
    for (i, element) in elements.iter().enumerate() {
        if elements[..i].iter().any(|seen| seen == element) {
            return Err(RuleError::Constraint(
                Fault::new("unique").arg("value", element),
            ));
        }
    }
    Ok(())
};

pub fn register_membership_rules(registry: &mut RuleRegistry) {
    registry.register("in", RULE_IN);
    registry.register("unique", RULE_UNIQUE);
}
