//! A canonical, type-safe representation of a position within a value tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a [`FieldPath`]: a record field name, a sequence index, or a
/// map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Field(String),
    Index(usize),
    Key(String),
}

/// Path from the validation root to one position in the value tree.
///
/// Renders in accessor style: `classes[2].cname`. The empty path names the
/// root value itself and renders as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath(pub Vec<Segment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Returns a new path extended by a record field name.
    pub fn field(&self, name: &str) -> Self {
        self.child(Segment::Field(name.to_string()))
    }

    /// Returns a new path extended by a sequence index.
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Returns a new path extended by a map key.
    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        FieldPath(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) | Segment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mixes_fields_indexes_and_keys() {
        let path = FieldPath::root().field("classes").index(2).field("cname");
        assert_eq!(path.to_string(), "classes[2].cname");

        let keyed = FieldPath::root().field("scores").key("zh");
        assert_eq!(keyed.to_string(), "scores.zh");
    }

    #[test]
    fn test_root_renders_empty() {
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().to_string(), "");
        assert!(!FieldPath::root().index(0).is_root());
    }

    #[test]
    fn test_extension_does_not_mutate_parent() {
        let parent = FieldPath::root().field("classes");
        let child = parent.index(1);
        assert_eq!(parent.segments().len(), 1);
        assert_eq!(child.segments().len(), 2);
    }
}
