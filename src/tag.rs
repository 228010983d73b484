//! Parser for the constraint-declaration grammar attached to record fields.
//!
//! A declaration is an ordered list of clauses separated by a configurable
//! delimiter (stable default `;`). A clause is a rule name, optionally
//! followed by `=` and a comma-separated parameter list; only the first `=`
//! splits, so later `=` characters stay inside the parameter text. The
//! literal `_` parameter is the open-bound sentinel for range rules.
//!
//! No escaping is defined: parameter values containing the delimiter
//! characters are unsupported, and whitespace is significant.
//!
//! # Examples
//!
//! ```rust
//! use sieve::tag;
//! let clauses = tag::parse("required;len=1,5", tag::DEFAULT_CLAUSE_DELIMITER);
//! assert_eq!(clauses.len(), 2);
//! assert_eq!(clauses[0].name, "required");
//! assert_eq!(clauses[1].params, vec!["1", "5"]);
//! ```

use miette::SourceSpan;
use serde::{Deserialize, Serialize};

/// Separates the rule name from its parameter list.
pub const ASSIGN_MARK: char = '=';

/// Separates parameters within a clause.
pub const PARAM_DELIMITER: char = ',';

/// Parameter token meaning "do not check this side" in range rules.
pub const UNBOUNDED: &str = "_";

/// Stable default clause delimiter.
pub const DEFAULT_CLAUSE_DELIMITER: char = ';';

/// Byte range of a clause within its raw declaration string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// One parsed rule clause: name, raw parameters, and the clause's span in
/// the declaration it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub name: String,
    pub params: Vec<String>,
    pub span: Span,
}

impl Clause {
    /// True when the clause names the given rule.
    pub fn is(&self, rule: &str) -> bool {
        self.name == rule
    }
}

/// Splits a declaration into ordered clauses.
///
/// Clauses with an empty name (doubled or trailing delimiters, or a bare
/// `=params` clause) are kept so the walker can report them instead of
/// silently dropping authoring mistakes.
pub fn parse(declaration: &str, delimiter: char) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut offset = 0;
    for piece in declaration.split(delimiter) {
        let span = Span {
            start: offset,
            end: offset + piece.len(),
        };
        clauses.push(parse_clause(piece, span));
        offset = span.end + delimiter.len_utf8();
    }
    clauses
}

fn parse_clause(raw: &str, span: Span) -> Clause {
    match raw.find(ASSIGN_MARK) {
        Some(at) => Clause {
            name: raw[..at].to_string(),
            params: raw[at + ASSIGN_MARK.len_utf8()..]
                .split(PARAM_DELIMITER)
                .map(str::to_string)
                .collect(),
            span,
        },
        None => Clause {
            name: raw.to_string(),
            params: Vec::new(),
            span,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_rule_has_no_params() {
        let clauses = parse("required", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses[0].name, "required");
        assert!(clauses[0].params.is_empty());
    }

    #[test]
    fn test_ordered_clauses_with_params() {
        let clauses = parse("required;len=1,5;in=a,b,c", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].name, "required");
        assert_eq!(clauses[1].name, "len");
        assert_eq!(clauses[1].params, vec!["1", "5"]);
        assert_eq!(clauses[2].name, "in");
        assert_eq!(clauses[2].params, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_only_first_assign_splits() {
        let clauses = parse("eq=a=b", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses[0].name, "eq");
        assert_eq!(clauses[0].params, vec!["a=b"]);
    }

    #[test]
    fn test_empty_clauses_are_kept() {
        let clauses = parse("required;;len=1", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[1].name, "");

        let trailing = parse("required;", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(trailing.len(), 2);
        assert_eq!(trailing[1].name, "");

        let headless = parse("=1,2", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(headless[0].name, "");
        assert_eq!(headless[0].params, vec!["1", "2"]);
    }

    #[test]
    fn test_spans_cover_each_clause() {
        let declaration = "required;len=1,5";
        let clauses = parse(declaration, DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses[0].span, Span { start: 0, end: 8 });
        assert_eq!(clauses[1].span, Span { start: 9, end: 16 });
        assert_eq!(&declaration[9..16], "len=1,5");
    }

    #[test]
    fn test_custom_delimiter() {
        let clauses = parse("required#len=1,5", '#');
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[1].name, "len");
        assert_eq!(clauses[1].params, vec!["1", "5"]);
    }

    #[test]
    fn test_whitespace_is_significant() {
        let clauses = parse("required; len=1,5", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses[1].name, " len");
    }

    #[test]
    fn test_unbounded_sentinel_is_a_plain_param() {
        let clauses = parse("len=_,3", DEFAULT_CLAUSE_DELIMITER);
        assert_eq!(clauses[0].params, vec![UNBOUNDED, "3"]);
    }
}
