use std::collections::BTreeSet;

use fieldwise_diff::compare;
use fieldwise_registry::ComparatorRegistry;
use fieldwise_types::inspect_record;
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct Node {
    label: String,
    weight: i64,
    tags: BTreeSet<String>,
    children: Vec<Node>,
}

inspect_record!(Node { label, weight, tags, children });

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = (
        "[a-c]{0,2}",
        -3i64..3,
        prop::collection::btree_set("[x-z]", 0..3),
    )
        .prop_map(|(label, weight, tags)| Node {
            label,
            weight,
            tags,
            children: Vec::new(),
        });
    leaf.prop_recursive(3, 16, 3, |inner| {
        (
            "[a-c]{0,2}",
            -3i64..3,
            prop::collection::btree_set("[x-z]", 0..3),
            prop::collection::vec(inner, 0..3),
        )
            .prop_map(|(label, weight, tags, children)| Node {
                label,
                weight,
                tags,
                children,
            })
    })
}

proptest! {
    #[test]
    fn clone_compares_equal(node in arb_node()) {
        let registry = ComparatorRegistry::new();
        let differences = compare(&node, &node.clone(), &registry).unwrap();
        prop_assert!(differences.is_empty(), "{differences}");
    }

    #[test]
    fn empty_result_agrees_with_structural_equality(a in arb_node(), b in arb_node()) {
        let registry = ComparatorRegistry::new();
        let differences = compare(&a, &b, &registry).unwrap();
        prop_assert_eq!(differences.is_empty(), a == b);
    }

    #[test]
    fn every_difference_has_distinct_renderings_or_tags(a in arb_node(), b in arb_node()) {
        let registry = ComparatorRegistry::new();
        for d in &compare(&a, &b, &registry).unwrap() {
            prop_assert!(d.actual.to_string() != d.expected.to_string(), "{d}");
        }
    }
}
