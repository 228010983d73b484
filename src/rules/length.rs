//! Length and range checks.

use std::cmp::Ordering;

use crate::rules::helpers::{category, count_mismatch, measure, parse_bound, Scalar};
use crate::rules::{Fault, RuleError, RuleFn, RuleRegistry, RuleResult};
use crate::tag::UNBOUNDED;
use crate::value::Kind;

/// Exact magnitude or inclusive range: `len=5`, `len=1,5`, `len=_,3`, `len=2,_`
///
/// Strings measure their code point count, sequences and maps their element
/// count, numeric kinds their own value. Either range end may be the `_`
/// sentinel, leaving that side unbounded.
pub const RULE_LEN: RuleFn = |kind, value, _title, params| {
    let Some(measured) = measure(value) else {
        return Err(RuleError::Unsupported(kind));
    };
    match params {
        [exact] => {
            let bound = parse_bound("len", measured, exact)?;
            if measured.compare(bound) == Some(Ordering::Equal) {
                Ok(())
            } else {
                Err(RuleError::Constraint(
                    Fault::new(format!("{}.eq", category(kind))).arg("min", exact),
                ))
            }
        }
        [lo, hi] => check_range(kind, measured, lo, hi),
        _ => Err(count_mismatch("len", "1 or 2", params.len())),
    }
};

fn check_range(kind: Kind, measured: Scalar, lo: &str, hi: &str) -> RuleResult {
    let above = lo == UNBOUNDED || {
        let bound = parse_bound("len", measured, lo)?;
        matches!(
            measured.compare(bound),
            Some(Ordering::Greater | Ordering::Equal)
        )
    };
    let below = hi == UNBOUNDED || {
        let bound = parse_bound("len", measured, hi)?;
        matches!(
            measured.compare(bound),
            Some(Ordering::Less | Ordering::Equal)
        )
    };
    if above && below {
        return Ok(());
    }
    // At least one side is bounded here, or both checks would have passed.
    let key = match (lo == UNBOUNDED, hi == UNBOUNDED) {
        (false, false) => format!("{}.between", category(kind)),
        (false, true) => format!("{}.gte", category(kind)),
        _ => format!("{}.lte", category(kind)),
    };
    Err(RuleError::Constraint(
        Fault::new(key).arg("min", lo).arg("max", hi),
    ))
}

pub fn register_length_rules(registry: &mut RuleRegistry) {
    registry.register("len", RULE_LEN);
}
