//! Violation reporting types.
//!
//! Violations are ordinary data returned in the `Ok` payload of a
//! validation call: the walker aggregates them in traversal order. Only a
//! misconfigured declaration travels on the `Err` channel (see
//! [`crate::errors::SieveError`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::FieldPath;

/// Classification of a reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A rule ran and the value does not satisfy it.
    Constraint,
    /// The declaration names a rule that is not registered.
    RuleNotFound,
    /// A clause's parameter list has the wrong count or fails to parse.
    ParameterMismatch,
    /// A record with zero declared fields, with allow-empty disabled.
    StructEmpty,
    /// Traversal depth passed the configured maximum.
    DepthExceeded,
}

/// A single reported constraint failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Offending rule name; empty for structural violations.
    pub rule: String,
    /// Display title of the offending field (falls back to the field name);
    /// the record name for empty-record violations.
    pub title: String,
    /// Position of the failure within the value tree.
    pub path: FieldPath,
    /// Rendered, locale-aware message.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
