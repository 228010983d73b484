//! # Sieve Test Fixtures
//!
//! Shared record builders and validation shorthand for the integration tests.

use sieve::{Field, Record, Validator, Value, Violation};

/// Wraps a single field in a throwaway record, the shape most rule tests use.
pub fn single(field: Field) -> Value {
    Value::Record(Record::new("Fixture").field(field))
}

/// Runs the default validator over one field and returns its violations.
pub fn violations_for(field: Field) -> Vec<Violation> {
    Validator::new()
        .validate(&single(field))
        .expect("fixture declarations are well formed")
}

/// A class record, the nested element of a student's `classes` list.
pub fn class(cname: &str, grade: i64) -> Record {
    Record::new("Class")
        .field(
            Field::new("cname", cname)
                .tag("required;len=1,10")
                .title("Class Name"),
        )
        .field(Field::new("grade", grade))
}

/// Student fixture: a name, an age, and a list of classes, each side carrying
/// its own constraints.
pub fn student(name: &str, age: i64, classes: Vec<Record>) -> Record {
    let classes: Vec<Value> = classes.into_iter().map(Value::Record).collect();
    Record::new("Student")
        .field(Field::new("name", name).tag("required;len=1,5").title("Name"))
        .field(Field::new("age", age).tag("required;len=1,120").title("Age"))
        .field(
            Field::new("classes", classes)
                .tag("required;len=1,3")
                .title("Classes"),
        )
}
