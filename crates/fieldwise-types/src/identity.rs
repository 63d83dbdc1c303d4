use std::fmt;

/// Reference identity of a traversed value.
///
/// Two values share an identity only when they are the same instance: the
/// same address *and* the same concrete type. A value and its first inline
/// part (a record's first field, an array's first element) may live at the
/// same address but never have the same concrete type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    concrete: &'static str,
    type_name: &'static str,
}

impl Identity {
    /// Identity of `value`, tagged with `type_name`.
    pub fn of<T: ?Sized>(value: &T, type_name: &'static str) -> Self {
        Self {
            addr: value as *const T as *const () as usize,
            concrete: std::any::type_name::<T>(),
            type_name,
        }
    }

    /// The address component.
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// The type tag component.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({}@{:#x})", self.type_name, self.addr)
    }
}

/// A type tag plus its linear ancestor chain, nearest ancestor first.
///
/// Rust has no inheritance, so ancestry is declared by the value itself.
/// Only the linear chain is walked during comparator fallback; there is no
/// notion of implemented interfaces here. Built-in numeric types descend
/// from `"integer"` or `"float"` and then `"number"`, so a comparator
/// registered for `"number"` applies to every numeric scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lineage {
    /// The concrete type tag.
    pub name: &'static str,
    /// Ancestors, nearest first.
    pub ancestors: &'static [&'static str],
}

impl Lineage {
    /// Lineage of the null value.
    pub const NULL: Lineage = Lineage::leaf("null");

    pub const fn new(name: &'static str, ancestors: &'static [&'static str]) -> Self {
        Self { name, ancestors }
    }

    /// A lineage with no ancestors.
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            ancestors: &[],
        }
    }

    /// The type tag followed by each ancestor, nearest first.
    pub fn chain(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.ancestors.iter().copied())
    }

    /// Returns `true` if `name` is this type or one of its ancestors.
    pub fn descends_from(&self, name: &str) -> bool {
        self.chain().any(|n| n == name)
    }
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Outer {
        inner: u64,
    }

    #[test]
    fn same_instance_same_identity() {
        let value = 42u32;
        assert_eq!(Identity::of(&value, "u32"), Identity::of(&value, "u32"));
    }

    #[test]
    fn equal_values_different_instances() {
        let a = String::from("x");
        let b = String::from("x");
        assert_ne!(Identity::of(&a, "String"), Identity::of(&b, "String"));
    }

    #[test]
    fn type_tag_separates_shared_address() {
        let outer = Outer::default();
        let outer_id = Identity::of(&outer, "Outer");
        let inner_id = Identity::of(&outer.inner, "u64");
        assert_eq!(outer_id.addr(), inner_id.addr());
        assert_ne!(outer_id, inner_id);
    }

    #[test]
    fn nested_array_and_first_row_are_distinct() {
        let grid = [[1, 2], [3, 4]];
        let outer_id = Identity::of(&grid, "array");
        let row_id = Identity::of(&grid[0], "array");
        assert_eq!(outer_id.addr(), row_id.addr());
        assert_ne!(outer_id, row_id);

        let single = [[7u8; 1]; 1];
        assert_ne!(Identity::of(&single, "array"), Identity::of(&single[0], "array"));
    }

    #[test]
    fn chain_starts_with_name() {
        const GIANT: Lineage = Lineage::new("Giant", &["Person", "Being"]);
        let chain: Vec<_> = GIANT.chain().collect();
        assert_eq!(chain, vec!["Giant", "Person", "Being"]);
        assert!(GIANT.descends_from("Being"));
        assert!(!GIANT.descends_from("Human"));
        assert_eq!(Lineage::NULL.chain().count(), 1);
    }
}
