use std::fmt;

use serde::{Serialize, Serializer};

/// One step of descent into a value graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named record field.
    Field(String),
    /// A position in an ordered sequence.
    Index(usize),
    /// A map entry, identified by its rendered key.
    Key(String),
}

/// Location of a value inside the compared graphs.
///
/// Displayed dotted: `home.address.number`, `friends[0].name`,
/// `scores[alice]`. Paths are built by appending one segment per descent
/// and are never mutated once handed to a [`Difference`](crate::Difference).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path, locating the compared roots themselves.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted field path such as `home.address.number`.
    pub fn parse_fields(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(|s| Segment::Field(s.to_string()))
                .collect(),
        }
    }

    /// A new path extended by `segment`.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn field(&self, name: impl Into<String>) -> Self {
        self.child(Segment::Field(name.into()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Field segments only, dot-joined.
    ///
    /// Index and key segments are dropped, so every element of
    /// `friends` shares the field path `friends.home.address.number`.
    /// This is the key used to look up path comparators.
    pub fn field_path(&self) -> String {
        let fields: Vec<&str> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        fields.join(".")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty() {
        let root = Path::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.field_path(), "");
    }

    #[test]
    fn nested_fields_are_dotted() {
        let path = Path::root().field("home").field("address").field("number");
        assert_eq!(path.to_string(), "home.address.number");
        assert_eq!(path.depth(), 3);
        assert_eq!(path, Path::parse_fields("home.address.number"));
    }

    #[test]
    fn synthetic_segments_use_brackets() {
        let path = Path::root().field("friends").index(0).field("name");
        assert_eq!(path.to_string(), "friends[0].name");

        let keyed = Path::root().field("scores").key("alice");
        assert_eq!(keyed.to_string(), "scores[alice]");
    }

    #[test]
    fn field_path_drops_synthetic_segments() {
        let path = Path::root()
            .field("friends")
            .index(3)
            .field("home")
            .field("address")
            .field("number");
        assert_eq!(path.field_path(), "friends.home.address.number");
    }

    #[test]
    fn child_leaves_parent_untouched() {
        let parent = Path::root().field("home");
        let child = parent.field("address");
        assert_eq!(parent.to_string(), "home");
        assert_eq!(child.to_string(), "home.address");
    }

    #[test]
    fn top_level_element_has_no_leading_dot() {
        let path = Path::root().index(2).field("name");
        assert_eq!(path.to_string(), "[2].name");
    }

    #[test]
    fn serializes_as_string() {
        let path = Path::root().field("a").index(1);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"a[1]\"");
    }
}
