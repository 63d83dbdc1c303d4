//! Cycle guard.

use std::collections::HashSet;

use fieldwise_types::Identity;

/// Identity pairs `(actual, expected)` already entered during one
/// top-level comparison.
///
/// Pairs are never removed: once a pair has been entered it is never
/// entered again anywhere in that comparison. This bounds every pair to a
/// single visit, which is what guarantees termination on cyclic graphs.
#[derive(Clone, Debug, Default)]
pub struct VisitedPairs {
    pairs: HashSet<(Identity, Identity)>,
}

impl VisitedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, actual: Identity, expected: Identity) -> bool {
        self.pairs.contains(&(actual, expected))
    }

    /// Record the pair. Returns `false` if it was already present.
    pub fn enter(&mut self, actual: Identity, expected: Identity) -> bool {
        self.pairs.insert((actual, expected))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_once() {
        let (a, b) = (1u8, 2u8);
        let ia = Identity::of(&a, "u8");
        let ib = Identity::of(&b, "u8");

        let mut visited = VisitedPairs::new();
        assert!(visited.is_empty());
        assert!(visited.enter(ia, ib));
        assert!(!visited.enter(ia, ib));
        assert!(visited.contains(ia, ib));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn pairs_are_ordered() {
        let (a, b) = (1u8, 2u8);
        let ia = Identity::of(&a, "u8");
        let ib = Identity::of(&b, "u8");

        let mut visited = VisitedPairs::new();
        visited.enter(ia, ib);
        assert!(!visited.contains(ib, ia));
    }

    #[test]
    fn clones_are_independent() {
        let (a, b) = (1u8, 2u8);
        let ia = Identity::of(&a, "u8");
        let ib = Identity::of(&b, "u8");

        let visited = VisitedPairs::new();
        let mut scratch = visited.clone();
        scratch.enter(ia, ib);
        assert!(!visited.contains(ia, ib));
    }
}
