//! Fatal engine errors.
//!
//! Ordinary validation outcomes are [`crate::report::Violation`]s in the
//! `Ok` payload. The `Err` channel is reserved for misconfiguration: the
//! constraint declaration itself is invalid for the data model, which is an
//! authoring mistake rather than bad user input.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::path::FieldPath;
use crate::value::Kind;

#[derive(Debug, Error, Diagnostic)]
pub enum SieveError {
    /// A rule was applied to a kind it cannot check, e.g. a numeric
    /// comparison on a record field.
    #[error("rule `{rule}` cannot validate {kind} values (field `{path}`)")]
    #[diagnostic(
        code(sieve::walk::unsupported_kind),
        help("change the declaration, or register a `{rule}` rule that accepts {kind} values")
    )]
    UnsupportedKind {
        rule: String,
        kind: Kind,
        path: FieldPath,
        #[source_code]
        declaration: NamedSource<String>,
        #[label("this clause")]
        clause: SourceSpan,
    },
}
