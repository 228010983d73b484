pub use crate::errors::SieveError;
pub use crate::lang::Catalog;
pub use crate::path::{FieldPath, Segment};
pub use crate::report::{Violation, ViolationKind};
pub use crate::rules::{
    build_default_registry, Fault, Rule, RuleError, RuleFn, RuleRegistry, RuleResult,
};
pub use crate::validator::{Validator, DEFAULT_MAX_DEPTH};
pub use crate::value::{Field, Kind, Record, Value};

pub mod errors;
pub mod lang;
pub mod path;
pub mod report;
pub mod rules;
pub mod tag;
pub mod validator;
pub mod value;

mod walk;
