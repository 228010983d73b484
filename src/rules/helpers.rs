//! Shared coercion and parameter plumbing for the builtin rules.

use std::cmp::Ordering;

use crate::rules::{Fault, RuleError};
use crate::value::{Kind, Value};

/// A value lowered to something comparable: a count, or the number itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scalar {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Scalar {
    /// Parses `raw` into the same variant as `self`, so bounds are read in
    /// the value's own kind ("01" is 1 against an int, text against a string).
    pub(crate) fn parse_like(self, raw: &str) -> Option<Scalar> {
        match self {
            Scalar::Int(_) => raw.parse::<i64>().ok().map(Scalar::Int),
            Scalar::Uint(_) => raw.parse::<u64>().ok().map(Scalar::Uint),
            Scalar::Float(_) => raw.parse::<f64>().ok().map(Scalar::Float),
        }
    }

    /// NaN on either side yields `None`, which every caller treats as a
    /// failed comparison.
    pub(crate) fn compare(self, other: Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(&b)),
            (Scalar::Uint(a), Scalar::Uint(b)) => Some(a.cmp(&b)),
            (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }

    pub(crate) fn kind_name(self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Uint(_) => "uint",
            Scalar::Float(_) => "float",
        }
    }
}

/// Lowers a value to its comparable magnitude: code point count for strings,
/// element count for containers, the value itself for numerics. `None` means
/// the kind has no magnitude and the caller reports it as unsupported.
pub(crate) fn measure(value: &Value) -> Option<Scalar> {
    match value {
        Value::Str(s) => Some(Scalar::Int(s.chars().count() as i64)),
        Value::Int(i) => Some(Scalar::Int(*i)),
        Value::Uint(u) => Some(Scalar::Uint(*u)),
        Value::Float(x) => Some(Scalar::Float(*x)),
        Value::Seq(items) => Some(Scalar::Int(items.len() as i64)),
        Value::Map(entries) => Some(Scalar::Int(entries.len() as i64)),
        _ => None,
    }
}

/// Message-key category for length and comparison outcomes.
pub(crate) fn category(kind: Kind) -> &'static str {
    match kind {
        Kind::Str => "string",
        Kind::Seq | Kind::Map => "array",
        _ => "number",
    }
}

/// Exactly one parameter, or a `params.count` fault.
pub(crate) fn one_param<'p>(rule: &str, params: &'p [&str]) -> Result<&'p str, RuleError> {
    match params {
        [single] => Ok(single),
        _ => Err(count_mismatch(rule, "1", params.len())),
    }
}

pub(crate) fn count_mismatch(rule: &str, expected: &str, got: usize) -> RuleError {
    RuleError::Params(
        Fault::new("params.count")
            .arg("rule", rule)
            .arg("expected", expected)
            .arg("got", got),
    )
}

/// Parses a bound in the value's own kind, or a `params.parse` fault.
pub(crate) fn parse_bound(rule: &str, like: Scalar, raw: &str) -> Result<Scalar, RuleError> {
    like.parse_like(raw)
        .ok_or_else(|| parse_mismatch(rule, raw, like.kind_name()))
}

pub(crate) fn parse_mismatch(rule: &str, param: &str, kind: &str) -> RuleError {
    RuleError::Params(
        Fault::new("params.parse")
            .arg("rule", rule)
            .arg("param", param)
            .arg("kind", kind),
    )
}

/// Coerces one raw parameter into a value of the element kind, for set
/// membership. Strings stay text; numerics parse, so `01` equals `1`.
pub(crate) fn parse_value_as(kind: Kind, raw: &str) -> Option<Value> {
    match kind {
        Kind::Str => Some(Value::Str(raw.to_string())),
        Kind::Int => raw.parse::<i64>().ok().map(Value::Int),
        Kind::Uint => raw.parse::<u64>().ok().map(Value::Uint),
        Kind::Float => raw.parse::<f64>().ok().map(Value::Float),
        Kind::Bool => match raw {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}
