//! Cycle-safe, bounded value rendering.

use fieldwise_types::{Identity, Inspect, Order, Rendered, Scalar, Shape};

use crate::config::EngineConfig;

/// Renders values for [`Difference`](fieldwise_types::Difference) records.
///
/// Records render as `Name { field: value, .. }`, sequences and sets as
/// `[a, b]`, maps as `{k: v}`. Unordered collections are sorted by their
/// rendered text so output is deterministic. A value already being
/// rendered further up renders as `<cycle>`.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    max_depth: usize,
    max_elements: usize,
}

impl Renderer {
    pub fn new(max_depth: usize, max_elements: usize) -> Self {
        Self {
            max_depth,
            max_elements,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.render_depth, config.render_elements)
    }

    pub fn render(&self, value: &dyn Inspect) -> Rendered {
        let mut stack = Vec::new();
        Rendered::new(self.text(value, 0, &mut stack))
    }

    /// A renderer with no depth or width limit.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX, usize::MAX)
    }

    /// Path segment text for a map key: bare for strings, rendered in full
    /// otherwise. Render limits never apply, so distinct keys are not
    /// truncated into the same segment.
    pub fn key_segment(key: &dyn Inspect) -> String {
        match key.shape() {
            Shape::Scalar(Scalar::Str(s)) => s.to_string(),
            _ => Self::unbounded().render(key).text().to_string(),
        }
    }

    fn text(&self, value: &dyn Inspect, depth: usize, stack: &mut Vec<Identity>) -> String {
        let shape = value.shape();
        match &shape {
            Shape::Null => return "null".to_string(),
            Shape::Scalar(scalar) => return scalar.to_string(),
            _ => {}
        }

        let identity = value.identity();
        if stack.contains(&identity) {
            return "<cycle>".to_string();
        }
        if depth >= self.max_depth {
            return match shape {
                Shape::Record(_) => format!("{} {{ .. }}", value.lineage().name),
                Shape::Map(_) => "{..}".to_string(),
                _ => "[..]".to_string(),
            };
        }

        stack.push(identity);
        let text = match shape {
            Shape::Record(fields) if fields.is_empty() => value.lineage().name.to_string(),
            Shape::Record(fields) => {
                let total = fields.len();
                let parts = fields
                    .iter()
                    .take(self.max_elements)
                    .map(|f| format!("{}: {}", f.name, self.text(f.value, depth + 1, stack)))
                    .collect();
                format!(
                    "{} {{ {} }}",
                    value.lineage().name,
                    self.join(parts, total, false)
                )
            }
            Shape::Sequence(collection) | Shape::Set(collection) => {
                let unordered = collection.kind.order == Order::Unordered;
                let total = collection.len();
                let parts = collection
                    .elements
                    .iter()
                    .take(if unordered { total } else { self.max_elements })
                    .map(|e| self.text(*e, depth + 1, stack))
                    .collect();
                format!("[{}]", self.join(parts, total, unordered))
            }
            Shape::Map(entries) => {
                let unordered = entries.kind.order == Order::Unordered;
                let total = entries.len();
                let parts = entries
                    .entries
                    .iter()
                    .take(if unordered { total } else { self.max_elements })
                    .map(|(k, v)| {
                        format!(
                            "{}: {}",
                            self.text(*k, depth + 1, stack),
                            self.text(*v, depth + 1, stack)
                        )
                    })
                    .collect();
                format!("{{{}}}", self.join(parts, total, unordered))
            }
            Shape::Null | Shape::Scalar(_) => unreachable!("leaves return early"),
        };
        stack.pop();
        text
    }

    fn join(&self, mut parts: Vec<String>, total: usize, sort: bool) -> String {
        if sort {
            parts.sort();
        }
        parts.truncate(self.max_elements);
        if total > self.max_elements {
            parts.push("...".to_string());
        }
        parts.join(", ")
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::OnceCell;
    use std::collections::{BTreeMap, HashSet};
    use std::rc::Rc;

    use fieldwise_types::inspect_record;

    struct Address {
        number: i32,
    }

    struct Home {
        address: Address,
    }

    struct Empty {}

    struct Node {
        name: &'static str,
        next: OnceCell<Rc<Node>>,
    }

    inspect_record!(Address { number });
    inspect_record!(Home { address });
    inspect_record!(Empty {});
    inspect_record!(Node { name, next });

    #[test]
    fn renders_nested_records() {
        let home = Home {
            address: Address { number: 1 },
        };
        assert_eq!(
            Renderer::default().render(&home).text(),
            "Home { address: Address { number: 1 } }"
        );
        assert_eq!(Renderer::default().render(&Empty {}).text(), "Empty");
    }

    #[test]
    fn renders_collections() {
        let renderer = Renderer::default();
        assert_eq!(renderer.render(&vec!["bar", "foo"]).text(), "[\"bar\", \"foo\"]");

        let map: BTreeMap<i64, bool> = [(1, true), (2, false)].into();
        assert_eq!(renderer.render(&map).text(), "{1: true, 2: false}");

        let set: HashSet<u8> = [3, 1, 2].into();
        assert_eq!(renderer.render(&set).text(), "[1, 2, 3]");

        let none: Option<i32> = None;
        assert_eq!(renderer.render(&none).text(), "null");
    }

    #[test]
    fn cycles_render_as_marker() {
        let a = Rc::new(Node {
            name: "a",
            next: OnceCell::new(),
        });
        let b = Rc::new(Node {
            name: "b",
            next: OnceCell::new(),
        });
        let _ = a.next.set(Rc::clone(&b));
        let _ = b.next.set(Rc::clone(&a));

        assert_eq!(
            Renderer::default().render(&a).text(),
            "Node { name: \"a\", next: Node { name: \"b\", next: <cycle> } }"
        );
    }

    #[test]
    fn depth_and_width_are_bounded() {
        let home = Home {
            address: Address { number: 1 },
        };
        assert_eq!(
            Renderer::new(1, 32).render(&home).text(),
            "Home { address: Address { .. } }"
        );
        assert_eq!(Renderer::new(3, 2).render(&vec![1, 2, 3]).text(), "[1, 2, ...]");
    }

    #[test]
    fn key_segments_are_bare_strings() {
        assert_eq!(Renderer::key_segment(&"alice"), "alice");
        assert_eq!(Renderer::key_segment(&7u32), "7");
    }

    #[test]
    fn key_segments_ignore_render_limits() {
        let long: Vec<i32> = (0..40).collect();
        let segment = Renderer::key_segment(&long);
        assert!(segment.ends_with("38, 39]"));
        assert!(!segment.contains("..."));
    }

    #[test]
    fn nested_arrays_are_not_cycles() {
        let grid = [[1, 2], [3, 4]];
        assert_eq!(Renderer::default().render(&grid).text(), "[[1, 2], [3, 4]]");

        let single = [[[5u8; 1]; 1]; 1];
        assert_eq!(Renderer::default().render(&single).text(), "[[[5]]]");
    }
}
