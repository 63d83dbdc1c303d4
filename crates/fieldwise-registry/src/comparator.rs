//! The comparator seam and the built-in comparators.

use fieldwise_types::{Inspect, Scalar, Shape};

/// A caller-supplied equality function bound to a path or a type.
///
/// The verdict is terminal: when a comparator applies at some point of the
/// traversal, nothing beneath that point is compared structurally.
/// Comparators are shared across comparisons and threads, hence the
/// `Send + Sync` bound.
pub trait ValueComparator: Send + Sync {
    /// Returns `true` if `actual` and `expected` are to be considered equal.
    ///
    /// Either side may be null ([`Shape::Null`]) when the other one is not.
    fn equivalent(&self, actual: &dyn Inspect, expected: &dyn Inspect) -> bool;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String {
        "custom comparator".to_string()
    }
}

impl<F> ValueComparator for F
where
    F: Fn(&dyn Inspect, &dyn Inspect) -> bool + Send + Sync,
{
    fn equivalent(&self, actual: &dyn Inspect, expected: &dyn Inspect) -> bool {
        self(actual, expected)
    }
}

fn scalar_of(value: &dyn Inspect) -> Option<Scalar<'_>> {
    match value.shape() {
        Shape::Scalar(scalar) => Some(scalar),
        _ => None,
    }
}

/// Numeric scalars are equal when they differ by at most `tolerance`.
///
/// Integers and floats are both accepted. Anything non-numeric, null
/// included, is unequal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtPrecision {
    tolerance: f64,
}

impl AtPrecision {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl ValueComparator for AtPrecision {
    fn equivalent(&self, actual: &dyn Inspect, expected: &dyn Inspect) -> bool {
        let (Some(a), Some(e)) = (
            scalar_of(actual).and_then(|s| s.as_f64()),
            scalar_of(expected).and_then(|s| s.as_f64()),
        ) else {
            return false;
        };
        if a == e || (a.is_nan() && e.is_nan()) {
            return true;
        }
        (a - e).abs() <= self.tolerance
    }

    fn describe(&self) -> String {
        format!("at precision {}", self.tolerance)
    }
}

/// Calendar instants are equal when they denote the same instant,
/// regardless of which concrete representation sits on which side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymmetricInstant;

impl ValueComparator for SymmetricInstant {
    fn equivalent(&self, actual: &dyn Inspect, expected: &dyn Inspect) -> bool {
        match (
            scalar_of(actual).and_then(|s| s.as_instant()),
            scalar_of(expected).and_then(|s| s.as_instant()),
        ) {
            (Some(a), Some(e)) => a == e,
            _ => false,
        }
    }

    fn describe(&self) -> String {
        "symmetric instant".to_string()
    }
}

/// Everything is equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysEqual;

impl ValueComparator for AlwaysEqual {
    fn equivalent(&self, _actual: &dyn Inspect, _expected: &dyn Inspect) -> bool {
        true
    }

    fn describe(&self) -> String {
        "always equal".to_string()
    }
}

/// Nothing is equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeverEqual;

impl ValueComparator for NeverEqual {
    fn equivalent(&self, _actual: &dyn Inspect, _expected: &dyn Inspect) -> bool {
        false
    }

    fn describe(&self) -> String {
        "never equal".to_string()
    }
}
