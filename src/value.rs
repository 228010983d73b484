//! The value model: every shape of data the engine can validate.
//!
//! A [`Value`] is a closed set of kinds (scalars, sequences, maps, records,
//! and optional indirection). Records carry their fields' constraint
//! declarations as plain string attributes, so the same record type works
//! with any façade configuration of attribute keys.

use std::borrow::Cow;
use std::fmt;

use im::OrdMap;
use serde::{Deserialize, Serialize};

/// Default attribute key holding a field's constraint declaration.
pub const TAG_ATTR: &str = "validate";

/// Default attribute key holding a field's display title.
pub const TITLE_ATTR: &str = "title";

/// The runtime category of a [`Value`].
///
/// # Examples
///
/// ```rust
/// use sieve::value::Kind;
/// assert_eq!(Kind::Str.name(), "string");
/// assert!(Kind::Uint.is_numeric());
/// assert!(!Kind::Seq.is_numeric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Str,
    Int,
    Uint,
    Float,
    Bool,
    Seq,
    Map,
    Record,
    Optional,
}

impl Kind {
    /// Returns the kind's name as used in messages and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Str => "string",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Seq => "seq",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Optional => "optional",
        }
    }

    /// True for the signed, unsigned, and floating numeric kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One named field of a [`Record`]: a value plus raw string attributes
/// (constraint declaration, display title, or any caller-chosen key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub attrs: OrdMap<String, String>,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Field {
            name: name.into(),
            attrs: OrdMap::new(),
            value: value.into(),
        }
    }

    /// Attaches an attribute under an arbitrary key.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Attaches a constraint declaration under the default key.
    pub fn tag(self, declaration: impl Into<String>) -> Self {
        self.attr(TAG_ATTR, declaration)
    }

    /// Attaches a display title under the default key.
    pub fn title(self, title: impl Into<String>) -> Self {
        self.attr(TITLE_ATTR, title)
    }
}

/// A named record with ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field, preserving declaration order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A value under validation.
///
/// # Examples
///
/// ```rust
/// use sieve::value::{Kind, Value};
/// let v = Value::Str("hello".to_string());
/// assert_eq!(v.kind(), Kind::Str);
/// assert!(!v.is_zero());
/// assert!(Value::Int(0).is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Seq(Vec<Value>),
    Map(OrdMap<String, Value>),
    Record(Record),
    Optional { kind: Kind, inner: Option<Box<Value>> },
}

impl Value {
    /// Returns the runtime kind of the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Str(_) => Kind::Str,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Optional { .. } => Kind::Optional,
        }
    }

    /// Returns the kind name as a string.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Wraps a value in present optional indirection, remembering its kind.
    pub fn some(inner: impl Into<Value>) -> Value {
        let inner = inner.into();
        Value::Optional {
            kind: inner.kind(),
            inner: Some(Box::new(inner)),
        }
    }

    /// An absent optional of the given pointee kind.
    pub fn none(kind: Kind) -> Value {
        Value::Optional { kind, inner: None }
    }

    /// The zero value of a kind: empty string, 0, 0.0, false, empty
    /// container, anonymous empty record, absent optional.
    pub fn zero(kind: Kind) -> Value {
        match kind {
            Kind::Str => Value::Str(String::new()),
            Kind::Int => Value::Int(0),
            Kind::Uint => Value::Uint(0),
            Kind::Float => Value::Float(0.0),
            Kind::Bool => Value::Bool(false),
            Kind::Seq => Value::Seq(Vec::new()),
            Kind::Map => Value::Map(OrdMap::new()),
            Kind::Record => Value::Record(Record::new("")),
            Kind::Optional => Value::Optional {
                kind: Kind::Optional,
                inner: None,
            },
        }
    }

    /// True when the value is its kind's zero. A record is zero when every
    /// field is zero; an optional is as zero as its pointee.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sieve::value::{Kind, Value};
    /// assert!(Value::Str(String::new()).is_zero());
    /// assert!(Value::none(Kind::Int).is_zero());
    /// assert!(!Value::Bool(true).is_zero());
    /// ```
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::Int(i) => *i == 0,
            Value::Uint(u) => *u == 0,
            Value::Float(x) => *x == 0.0,
            Value::Bool(b) => !b,
            Value::Seq(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Record(record) => record.fields.iter().all(|f| f.value.is_zero()),
            Value::Optional { inner: None, .. } => true,
            Value::Optional { inner: Some(inner), .. } => inner.is_zero(),
        }
    }

    /// Strips one level of optional indirection. A present optional yields
    /// its pointee; an absent one yields the zero value of the pointee kind;
    /// anything else is returned as-is.
    pub fn deref_optional(&self) -> Cow<'_, Value> {
        match self {
            Value::Optional { inner: Some(inner), .. } => Cow::Borrowed(inner.as_ref()),
            Value::Optional { kind, inner: None } => Cow::Owned(Value::zero(*kind)),
            other => Cow::Borrowed(other),
        }
    }

    /// Returns the contained string slice if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    fn fmt_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }

    fn fmt_map(f: &mut fmt::Formatter<'_>, entries: &OrdMap<String, Value>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (k, v) in entries.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
            first = false;
        }
        write!(f, "}}")
    }

    fn fmt_record(f: &mut fmt::Formatter<'_>, record: &Record) -> fmt::Result {
        write!(f, "{}{{", record.name)?;
        for (i, field) in record.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Seq(items) => Value::fmt_seq(f, items),
            Value::Map(entries) => Value::fmt_map(f, entries),
            Value::Record(record) => Value::fmt_record(f, record),
            Value::Optional { inner: Some(inner), .. } => write!(f, "{}", inner),
            Value::Optional { inner: None, .. } => write!(f, "nil"),
        }
    }
}

// ------------------------------------------------------------------------
// Conversions
// ------------------------------------------------------------------------

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// Bridge for callers validating decoded JSON payloads. JSON null carries no
/// kind of its own and becomes an absent optional string.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::none(Kind::Str),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_by_kind() {
        assert!(Value::zero(Kind::Str).is_zero());
        assert!(Value::zero(Kind::Int).is_zero());
        assert!(Value::zero(Kind::Float).is_zero());
        assert!(Value::zero(Kind::Bool).is_zero());
        assert!(Value::zero(Kind::Seq).is_zero());
        assert!(Value::zero(Kind::Map).is_zero());
        assert!(Value::zero(Kind::Record).is_zero());
    }

    #[test]
    fn test_record_is_zero_when_all_fields_are_zero() {
        let zeroed = Record::new("User")
            .field(Field::new("name", ""))
            .field(Field::new("age", 0i64));
        assert!(Value::Record(zeroed).is_zero());

        let partial = Record::new("User")
            .field(Field::new("name", "Bob"))
            .field(Field::new("age", 0i64));
        assert!(!Value::Record(partial).is_zero());
    }

    #[test]
    fn test_deref_optional() {
        let present = Value::some(Value::Int(7));
        assert_eq!(present.deref_optional().as_ref(), &Value::Int(7));

        let absent = Value::none(Kind::Str);
        assert_eq!(absent.deref_optional().as_ref(), &Value::Str(String::new()));

        let plain = Value::Bool(true);
        assert_eq!(plain.deref_optional().as_ref(), &Value::Bool(true));
    }

    #[test]
    fn test_json_bridge() {
        let json: serde_json::Value = serde_json::json!({
            "name": "Bob",
            "age": 17,
            "scores": [90.5, 88.0],
            "nickname": null,
        });
        let value = Value::from(json);
        let Value::Map(entries) = &value else {
            panic!("object should bridge to a map");
        };
        assert_eq!(entries.get("name"), Some(&Value::Str("Bob".to_string())));
        assert_eq!(entries.get("age"), Some(&Value::Int(17)));
        assert_eq!(
            entries.get("scores"),
            Some(&Value::Seq(vec![Value::Float(90.5), Value::Float(88.0)]))
        );
        assert_eq!(entries.get("nickname"), Some(&Value::none(Kind::Str)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Str("abc".to_string()).to_string(), "abc");
        assert_eq!(Value::none(Kind::Int).to_string(), "nil");
        assert_eq!(
            Value::Seq(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
    }
}
