use fieldwise_types::{Difference, DifferenceSet};

/// Append-only accumulator of differences in discovery order.
#[derive(Debug, Default)]
pub struct DifferenceCollector {
    differences: Vec<Difference>,
}

impl DifferenceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, difference: Difference) {
        self.differences.push(difference);
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Freeze into an immutable [`DifferenceSet`].
    pub fn finish(self) -> DifferenceSet {
        DifferenceSet::from(self.differences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwise_types::{Path, Rendered};

    #[test]
    fn keeps_insertion_order_and_shared_prefixes() {
        let mut collector = DifferenceCollector::new();
        collector.push(Difference::new(
            Path::parse_fields("home.address.number"),
            Rendered::new("1"),
            Rendered::new("2"),
        ));
        collector.push(Difference::new(
            Path::parse_fields("home.address.street"),
            Rendered::new("\"a\""),
            Rendered::new("\"b\""),
        ));
        assert_eq!(collector.len(), 2);

        let set = collector.finish();
        assert_eq!(set.paths(), vec!["home.address.number", "home.address.street"]);
    }
}
