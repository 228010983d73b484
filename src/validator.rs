//! The façade callers construct, configure, and reuse across validation calls.

use crate::errors::SieveError;
use crate::lang::Catalog;
use crate::report::Violation;
use crate::rules::{build_default_registry, Rule, RuleFn, RuleRegistry};
use crate::tag::DEFAULT_CLAUSE_DELIMITER;
use crate::value::{Value, TAG_ATTR, TITLE_ATTR};
use crate::walk;

/// Recursion ceiling that turns a runaway nested structure into a reported
/// violation instead of a stack overflow.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Validation façade: a rule registry, a message catalog, and the walker
/// policy knobs, configured once and reused across any number of calls.
///
/// Every setter consumes and returns `self`, so a validator is built in one
/// fluent chain and never mutated afterwards. A configured validator may be
/// shared by reference across threads.
///
/// # Examples
/// ```rust
/// use sieve::{Field, Record, Validator, Value};
///
/// let user = Record::new("User")
///     .field(Field::new("name", "").tag("required").title("Name"))
///     .field(Field::new("age", 25_i64).tag("len=1,120"));
///
/// let violations = Validator::new().validate(&Value::Record(user)).unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].message, "Name cannot be empty");
/// ```
#[derive(Clone)]
pub struct Validator {
    pub(crate) tag_key: String,
    pub(crate) title_key: String,
    pub(crate) clause_delimiter: char,
    pub(crate) allow_empty: bool,
    pub(crate) fail_fast: bool,
    pub(crate) max_depth: usize,
    pub(crate) locale: String,
    pub(crate) rules: RuleRegistry,
    pub(crate) catalog: Catalog,
}

impl Validator {
    pub fn new() -> Self {
        Validator {
            tag_key: TAG_ATTR.to_string(),
            title_key: TITLE_ATTR.to_string(),
            clause_delimiter: DEFAULT_CLAUSE_DELIMITER,
            allow_empty: true,
            fail_fast: false,
            max_depth: DEFAULT_MAX_DEPTH,
            locale: "en".to_string(),
            rules: build_default_registry(),
            catalog: Catalog::builtin(),
        }
    }

    /// Attribute key the walker reads constraint declarations from.
    /// Defaults to `validate`.
    pub fn tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Attribute key for the human-facing field title. Defaults to `title`.
    pub fn title_key(mut self, key: impl Into<String>) -> Self {
        self.title_key = key.into();
        self
    }

    /// Character separating clauses in a declaration. Defaults to `;`.
    pub fn clause_delimiter(mut self, delimiter: char) -> Self {
        self.clause_delimiter = delimiter;
        self
    }

    /// When disabled, zero-valued fields without a `required` clause are not
    /// checked at all, and empty records report a violation. Defaults to
    /// enabled: every clause runs, even against zero values.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Stop at the first violation instead of collecting all of them.
    /// Defaults to off.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Nesting ceiling; deeper subtrees report a violation and are not
    /// descended into. Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Locale the message catalog renders in. Defaults to `en`.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Replaces the message catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Registers one rule, replacing any builtin of the same name.
    pub fn register_rule(mut self, name: impl Into<String>, rule: impl Rule + 'static) -> Self {
        self.rules.register(name, rule);
        self
    }

    /// Registers a batch of plain-function rules.
    pub fn register_rules<N: Into<String>>(
        mut self,
        rules: impl IntoIterator<Item = (N, RuleFn)>,
    ) -> Self {
        for (name, rule) in rules {
            self.rules.register(name, rule);
        }
        self
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Walks the value and returns every violation found, in declaration
    /// order. `Err` means the schema itself is broken (a rule applied to a
    /// kind it cannot check), not that the value is invalid.
    pub fn validate(&self, value: &Value) -> Result<Vec<Violation>, SieveError> {
        walk::run(self, value, self.fail_fast)
    }

    /// Like [`validate`](Self::validate), but stops at the first violation.
    pub fn validate_fail_fast(&self, value: &Value) -> Result<Option<Violation>, SieveError> {
        Ok(walk::run(self, value, true)?.into_iter().next())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
