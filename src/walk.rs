//! Depth-first traversal of a value tree, applying each field's constraint
//! declaration and collecting violations.
//!
//! The walker owns everything a rule is not allowed to know: paths, locales,
//! skip policy, recursion, and the halt/continue decision after each report.

use miette::NamedSource;

use crate::errors::SieveError;
use crate::path::FieldPath;
use crate::report::{Violation, ViolationKind};
use crate::rules::{Fault, RuleError};
use crate::tag::{self, Clause};
use crate::validator::Validator;
use crate::value::{Field, Record, Value};

/// Whether the walk continues after a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

pub(crate) fn run(
    config: &Validator,
    root: &Value,
    fail_fast: bool,
) -> Result<Vec<Violation>, SieveError> {
    let mut walker = Walker {
        config,
        fail_fast,
        violations: Vec::new(),
    };
    walker.visit(root, FieldPath::root(), 0)?;
    Ok(walker.violations)
}

struct Walker<'a> {
    config: &'a Validator,
    fail_fast: bool,
    violations: Vec<Violation>,
}

impl Walker<'_> {
    /// Visits one subtree. Callers only descend into values that can hold
    /// records, so an exceeded depth is reported once per such subtree.
    fn visit(&mut self, value: &Value, path: FieldPath, depth: usize) -> Result<Flow, SieveError> {
        if depth > self.config.max_depth {
            let message = self.render(
                "max_depth",
                &[("depth", self.config.max_depth.to_string())],
            );
            return Ok(self.report(Violation {
                kind: ViolationKind::DepthExceeded,
                rule: String::new(),
                title: String::new(),
                path,
                message,
            }));
        }
        let target = value.deref_optional();
        match target.as_ref() {
            Value::Record(record) => self.visit_record(record, path, depth),
            Value::Seq(items) => {
                if !items.first().map_or(false, element_recurses) {
                    return Ok(Flow::Continue);
                }
                for (i, item) in items.iter().enumerate() {
                    if !element_recurses(item) {
                        continue;
                    }
                    if self.visit(item, path.index(i), depth + 1)? == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
                Ok(Flow::Continue)
            }
            Value::Map(entries) => {
                for (key, item) in entries {
                    if !element_recurses(item) {
                        continue;
                    }
                    if self.visit(item, path.key(key), depth + 1)? == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn visit_record(
        &mut self,
        record: &Record,
        path: FieldPath,
        depth: usize,
    ) -> Result<Flow, SieveError> {
        if record.fields.is_empty() {
            if self.config.allow_empty {
                return Ok(Flow::Continue);
            }
            let message = self.render("struct_empty", &[("record", record.name.clone())]);
            return Ok(self.report(Violation {
                kind: ViolationKind::StructEmpty,
                rule: String::new(),
                title: record.name.clone(),
                path,
                message,
            }));
        }
        for field in &record.fields {
            let field_path = path.field(&field.name);
            let target = field.value.deref_optional();
            if let Some(declaration) = field.attrs.get(&self.config.tag_key) {
                if !declaration.is_empty() {
                    let clauses = tag::parse(declaration, self.config.clause_delimiter);
                    // Zero values without a `required` clause are not checked
                    // at all unless empties are allowed.
                    let skip = target.is_zero()
                        && !self.config.allow_empty
                        && !clauses.iter().any(|clause| clause.is("required"));
                    if skip {
                        continue;
                    }
                    let flow = self.evaluate_clauses(
                        declaration,
                        &clauses,
                        field,
                        target.as_ref(),
                        &field_path,
                    )?;
                    if flow == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
            }
            if holds_records(&field.value)
                && self.visit(&field.value, field_path, depth + 1)? == Flow::Halt
            {
                return Ok(Flow::Halt);
            }
        }
        Ok(Flow::Continue)
    }

    fn evaluate_clauses(
        &mut self,
        declaration: &str,
        clauses: &[Clause],
        field: &Field,
        target: &Value,
        path: &FieldPath,
    ) -> Result<Flow, SieveError> {
        let title = field
            .attrs
            .get(&self.config.title_key)
            .cloned()
            .unwrap_or_else(|| field.name.clone());
        for clause in clauses {
            let Some(rule) = self.config.rules.get(&clause.name) else {
                let message = self.render("rule_not_found", &[("rule", clause.name.clone())]);
                let flow = self.report(Violation {
                    kind: ViolationKind::RuleNotFound,
                    rule: clause.name.clone(),
                    title: title.clone(),
                    path: path.clone(),
                    message,
                });
                if flow == Flow::Halt {
                    return Ok(Flow::Halt);
                }
                continue;
            };
            let params: Vec<&str> = clause.params.iter().map(String::as_str).collect();
            match rule.evaluate(target.kind(), target, &title, &params) {
                Ok(()) => {}
                Err(RuleError::Constraint(fault)) => {
                    let flow = self.report_fault(
                        ViolationKind::Constraint,
                        fault,
                        clause,
                        &title,
                        target,
                        path,
                    );
                    if flow == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
                Err(RuleError::Params(fault)) => {
                    let flow = self.report_fault(
                        ViolationKind::ParameterMismatch,
                        fault,
                        clause,
                        &title,
                        target,
                        path,
                    );
                    if flow == Flow::Halt {
                        return Ok(Flow::Halt);
                    }
                }
                Err(RuleError::Unsupported(kind)) => {
                    return Err(SieveError::UnsupportedKind {
                        rule: clause.name.clone(),
                        kind,
                        path: path.clone(),
                        declaration: NamedSource::new(path.to_string(), declaration.to_string()),
                        clause: clause.span.into(),
                    });
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Fills in the standard `name`, `value`, and `rule` arguments any
    /// template may reference, renders the message, and reports.
    fn report_fault(
        &mut self,
        kind: ViolationKind,
        fault: Fault,
        clause: &Clause,
        title: &str,
        target: &Value,
        path: &FieldPath,
    ) -> Flow {
        let Fault { key, mut args } = fault;
        if !args.iter().any(|(name, _)| *name == "name") {
            args.push(("name", title.to_string()));
        }
        if !args.iter().any(|(name, _)| *name == "value") {
            args.push(("value", target.to_string()));
        }
        if !args.iter().any(|(name, _)| *name == "rule") {
            args.push(("rule", clause.name.clone()));
        }
        let message = self.render(&key, &args);
        self.report(Violation {
            kind,
            rule: clause.name.clone(),
            title: title.to_string(),
            path: path.clone(),
            message,
        })
    }

    fn render(&self, key: &str, args: &[(&str, String)]) -> String {
        self.config.catalog.render(&self.config.locale, key, args)
    }

    fn report(&mut self, violation: Violation) -> Flow {
        self.violations.push(violation);
        if self.fail_fast {
            Flow::Halt
        } else {
            Flow::Continue
        }
    }
}

/// Element recursion: records descend, and so do sequences whose first
/// element does. Scalar containers stay opaque.
fn element_recurses(value: &Value) -> bool {
    match value.deref_optional().as_ref() {
        Value::Record(_) => true,
        Value::Seq(items) => items.first().map_or(false, element_recurses),
        _ => false,
    }
}

/// Whether a field value holds anything the walker would descend into.
fn holds_records(value: &Value) -> bool {
    if let Value::Map(entries) = value.deref_optional().as_ref() {
        return entries.values().any(element_recurses);
    }
    element_recurses(value)
}
