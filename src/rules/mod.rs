//! # Sieve Rule System
//!
//! Rules are the named checks a constraint declaration can invoke. Each one
//! receives the field's kind, value, display title, and raw parameters, and
//! answers with a pass, a violation payload, or a misconfiguration signal.
//!
//! ## Module Structure
//!
//! - **`helpers`**: shared coercion and parameter plumbing
//! - **`presence`**: `required`
//! - **`length`**: `len` (exact and ranged)
//! - **`compare`**: `eq`, `lt`, `lte`, `gt`, `gte` plus the `min`/`max` aliases
//! - **`membership`**: `in`, `unique`
//! - **`format`**: `email`, `phone`, `number`, `url`, `ip`, `ipv4`, `ipv6`, `datetime`
//!
//! ## Design Principles
//!
//! - Each domain module depends only on `helpers`
//! - Every builtin is a plain `RuleFn` const sharing one signature
//! - Rules never see paths or locales; the walker owns reporting

use std::fmt;
use std::sync::Arc;

use im::HashMap;

use crate::value::{Kind, Value};

// ============================================================================
// CORE TYPES AND TRAITS
// ============================================================================

/// Message payload of a failed check: a catalog key plus the arguments its
/// template may reference. The walker fills in the standard `name`, `value`,
/// and `rule` arguments; rules add the specific ones (bounds, sets, formats).
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub key: String,
    pub args: Vec<(&'static str, String)>,
}

impl Fault {
    pub fn new(key: impl Into<String>) -> Self {
        Fault {
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.args.push((name, value.to_string()));
        self
    }
}

/// Everything that can happen inside one rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleError {
    /// The value fails the constraint. Reported as an ordinary violation.
    Constraint(Fault),
    /// The clause's parameter list is unusable (wrong count, bad parse).
    Params(Fault),
    /// The rule does not support this kind of value. Fatal misconfiguration.
    Unsupported(Kind),
}

pub type RuleResult = Result<(), RuleError>;

/// Capability interface for a named check.
///
/// Implemented for free by any `Fn(Kind, &Value, &str, &[&str]) ->
/// RuleResult` that is `Send + Sync`, so plain functions, the builtin
/// [`RuleFn`] consts, and capturing closures all register directly.
pub trait Rule: Send + Sync {
    fn evaluate(&self, kind: Kind, value: &Value, title: &str, params: &[&str]) -> RuleResult;
}

/// Plain function form of [`Rule`]; every builtin uses it.
pub type RuleFn = fn(kind: Kind, value: &Value, title: &str, params: &[&str]) -> RuleResult;

impl<F> Rule for F
where
    F: Fn(Kind, &Value, &str, &[&str]) -> RuleResult + Send + Sync,
{
    fn evaluate(&self, kind: Kind, value: &Value, title: &str, params: &[&str]) -> RuleResult {
        self(kind, value, title, params)
    }
}

// ============================================================================
// RULE REGISTRY
// ============================================================================

/// Registry for all rules, inspectable at runtime.
///
/// Mutation is a setup-time operation: a validation pass only reads the
/// registry, so a configured registry may be shared by reference across
/// threads.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Rule>> {
        self.rules.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    // API for extensibility; registering an existing name replaces it.
    pub fn register(&mut self, name: impl Into<String>, rule: impl Rule + 'static) {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Rule>> {
        self.rules.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// MODULAR RULE IMPLEMENTATIONS
// ============================================================================

// Shared infrastructure for all rules
pub mod helpers;

// Domain-specific rule modules
pub mod compare;
pub mod format;
pub mod length;
pub mod membership;
pub mod presence;

pub use compare::{RULE_EQ, RULE_GT, RULE_GTE, RULE_LT, RULE_LTE};
pub use format::{
    RULE_DATETIME, RULE_EMAIL, RULE_IP, RULE_IPV4, RULE_IPV6, RULE_NUMBER, RULE_PHONE, RULE_URL,
};
pub use length::RULE_LEN;
pub use membership::{RULE_IN, RULE_UNIQUE};
pub use presence::RULE_REQUIRED;

// ============================================================================
// UNIFIED REGISTRATION
// ============================================================================

/// Registers every builtin rule with the given registry.
pub fn register_builtin_rules(registry: &mut RuleRegistry) {
    presence::register_presence_rules(registry);
    length::register_length_rules(registry);
    compare::register_compare_rules(registry);
    membership::register_membership_rules(registry);
    format::register_format_rules(registry);
}

/// Builds and returns a fully populated registry with all builtins.
///
/// # Example
/// ```rust
/// use sieve::rules::build_default_registry;
/// let registry = build_default_registry();
/// assert!(registry.has("required"));
/// assert!(registry.has("len"));
/// ```
#[inline]
pub fn build_default_registry() -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    register_builtin_rules(&mut registry);
    registry
}
