//! Comparison output: rendered values, differences, and difference sets.

use std::fmt;

use serde::Serialize;

use crate::path::Path;

/// Textual representation of a compared value.
///
/// The optional tag names the concrete type or collection kind. It is set
/// whenever the text alone cannot tell the two sides apart, e.g. a
/// `BTreeSet` and an insertion-ordered set holding the same elements.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rendered {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'static str>,
}

impl Rendered {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    /// Rendering of the null value.
    pub fn null() -> Self {
        Self::new("null")
    }

    /// Attach a type or kind tag.
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag {
            Some(tag) => write!(f, "{} ({tag})", self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// One structural discrepancy between actual and expected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub path: Path,
    pub actual: Rendered,
    pub expected: Rendered,
}

impl Difference {
    pub fn new(path: Path, actual: Rendered, expected: Rendered) -> Self {
        Self {
            path,
            actual,
            expected,
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path to difference: <{}>", self.path)?;
        writeln!(f, "- actual  : {}", self.actual)?;
        write!(f, "- expected: {}", self.expected)
    }
}

/// Ordered differences produced by one comparison, in discovery order.
///
/// An empty set means the two graphs are structurally equal under the
/// configuration used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DifferenceSet {
    differences: Vec<Difference>,
}

impl DifferenceSet {
    /// Create an empty difference set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no differences.
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of differences.
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.differences.iter()
    }

    pub fn as_slice(&self) -> &[Difference] {
        &self.differences
    }

    /// The difference recorded at the dotted `path`, if any.
    pub fn get(&self, path: &str) -> Option<&Difference> {
        self.differences
            .iter()
            .find(|d| d.path.to_string() == path)
    }

    /// Dotted paths of every difference, in discovery order.
    pub fn paths(&self) -> Vec<String> {
        self.differences.iter().map(|d| d.path.to_string()).collect()
    }

    pub fn into_vec(self) -> Vec<Difference> {
        self.differences
    }
}

impl From<Vec<Difference>> for DifferenceSet {
    fn from(differences: Vec<Difference>) -> Self {
        Self { differences }
    }
}

impl IntoIterator for DifferenceSet {
    type Item = Difference;
    type IntoIter = std::vec::IntoIter<Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.into_iter()
    }
}

impl<'a> IntoIterator for &'a DifferenceSet {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}

impl fmt::Display for DifferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, difference) in self.differences.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{difference}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_difference() -> Difference {
        Difference::new(
            Path::root().field("name"),
            Rendered::new("\"Jack\""),
            Rendered::new("\"John\""),
        )
    }

    #[test]
    fn tagged_rendering_shows_kind() {
        let rendered = Rendered::new("[\"bar\", \"foo\"]").tagged("BTreeSet");
        assert_eq!(rendered.to_string(), "[\"bar\", \"foo\"] (BTreeSet)");
        assert_eq!(rendered.tag(), Some("BTreeSet"));
        assert_eq!(Rendered::null().to_string(), "null");
    }

    #[test]
    fn difference_display() {
        assert_eq!(
            name_difference().to_string(),
            "Path to difference: <name>\n- actual  : \"Jack\"\n- expected: \"John\""
        );
    }

    #[test]
    fn set_lookup_by_path() {
        let number = Difference::new(
            Path::parse_fields("home.address.number"),
            Rendered::new("1"),
            Rendered::new("2"),
        );
        let set = DifferenceSet::from(vec![name_difference(), number]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.paths(), vec!["name", "home.address.number"]);
        assert_eq!(set.get("home.address.number").unwrap().actual.text(), "1");
        assert!(set.get("home").is_none());
    }

    #[test]
    fn set_display_separates_entries() {
        let set = DifferenceSet::from(vec![name_difference(), name_difference()]);
        let text = set.to_string();
        assert_eq!(text.matches("Path to difference").count(), 2);
        assert!(text.contains("\"John\"\n\nPath to difference"));
    }

    #[test]
    fn serializes_for_reporters() {
        let tagged = Difference::new(
            Path::root().field("collection"),
            Rendered::new("[1]").tagged("Vec"),
            Rendered::new("[1]").tagged("VecDeque"),
        );
        let set = DifferenceSet::from(vec![name_difference(), tagged]);
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "path": "name",
                    "actual": { "text": "\"Jack\"" },
                    "expected": { "text": "\"John\"" }
                },
                {
                    "path": "collection",
                    "actual": { "text": "[1]", "tag": "Vec" },
                    "expected": { "text": "[1]", "tag": "VecDeque" }
                }
            ])
        );
    }
}
