use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use fieldwise_types::Lineage;

use crate::comparator::{AtPrecision, ValueComparator};

/// Where a resolved comparator was registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Registered for the exact field path.
    Field,
    /// Registered for the value's own type tag.
    Type(&'static str),
    /// Registered for an ancestor in the value's lineage.
    Ancestor(&'static str),
}

/// A comparator found for one traversal point.
pub struct Resolved<'r> {
    pub comparator: &'r dyn ValueComparator,
    pub origin: Origin,
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("comparator", &self.comparator.describe())
            .field("origin", &self.origin)
            .finish()
    }
}

/// Per-field-path and per-type comparator overrides.
///
/// Both maps are filled by the caller before a comparison and only read
/// during traversal. Cloning is cheap: comparators are reference counted,
/// so one registry can back any number of concurrent comparisons.
#[derive(Clone, Default)]
pub struct ComparatorRegistry {
    fields: BTreeMap<String, Arc<dyn ValueComparator>>,
    types: BTreeMap<String, Arc<dyn ValueComparator>>,
}

impl ComparatorRegistry {
    /// An empty registry: every comparison is structural.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default type comparators: `f64` at precision `1e-15` and `f32`
    /// at precision `1e-6`.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_type("f64", AtPrecision::new(1e-15))
            .with_type("f32", AtPrecision::new(1e-6))
    }

    // ---------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------

    /// Register `comparator` for the dotted field path `path`,
    /// e.g. `home.address.number`. Replaces any previous registration.
    pub fn register_field(
        &mut self,
        path: impl Into<String>,
        comparator: impl ValueComparator + 'static,
    ) {
        self.fields.insert(path.into(), Arc::new(comparator));
    }

    /// Register one comparator for several field paths.
    pub fn register_fields<I, S>(&mut self, paths: I, comparator: impl ValueComparator + 'static)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let shared: Arc<dyn ValueComparator> = Arc::new(comparator);
        for path in paths {
            self.register_field_shared(path, Arc::clone(&shared));
        }
    }

    /// Register `comparator` for a type tag or ancestor tag, e.g. `f64`,
    /// `number`, `Person`. Replaces any previous registration.
    pub fn register_type(
        &mut self,
        type_name: impl Into<String>,
        comparator: impl ValueComparator + 'static,
    ) {
        self.types.insert(type_name.into(), Arc::new(comparator));
    }

    /// Register an already shared comparator for a field path.
    pub fn register_field_shared(
        &mut self,
        path: impl Into<String>,
        comparator: Arc<dyn ValueComparator>,
    ) {
        self.fields.insert(path.into(), comparator);
    }

    /// Register an already shared comparator for a type tag.
    pub fn register_type_shared(
        &mut self,
        type_name: impl Into<String>,
        comparator: Arc<dyn ValueComparator>,
    ) {
        self.types.insert(type_name.into(), comparator);
    }

    /// Builder form of [`Self::register_field`].
    pub fn with_field(
        mut self,
        path: impl Into<String>,
        comparator: impl ValueComparator + 'static,
    ) -> Self {
        self.register_field(path, comparator);
        self
    }

    /// Builder form of [`Self::register_type`].
    pub fn with_type(
        mut self,
        type_name: impl Into<String>,
        comparator: impl ValueComparator + 'static,
    ) -> Self {
        self.register_type(type_name, comparator);
        self
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Find the comparator that applies at `field_path` to a value of
    /// `lineage`.
    ///
    /// First match wins: exact field path, then the type tag, then each
    /// ancestor nearest first. `None` means structural comparison.
    pub fn resolve(&self, field_path: &str, lineage: &Lineage) -> Option<Resolved<'_>> {
        if let Some(comparator) = self.field_comparator(field_path) {
            return Some(Resolved {
                comparator,
                origin: Origin::Field,
            });
        }
        self.type_comparator(lineage)
    }

    /// The comparator registered for exactly `field_path`.
    pub fn field_comparator(&self, field_path: &str) -> Option<&dyn ValueComparator> {
        self.fields.get(field_path).map(|c| c.as_ref())
    }

    /// The comparator registered for `lineage` or its nearest ancestor.
    pub fn type_comparator(&self, lineage: &Lineage) -> Option<Resolved<'_>> {
        lineage.chain().enumerate().find_map(|(depth, name)| {
            self.types.get(name).map(|c| Resolved {
                comparator: c.as_ref(),
                origin: if depth == 0 {
                    Origin::Type(name)
                } else {
                    Origin::Ancestor(name)
                },
            })
        })
    }

    pub fn has_field_comparators(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn has_type_comparators(&self) -> bool {
        !self.types.is_empty()
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.fields.len() + self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.types.is_empty()
    }

    /// Registered field paths, sorted.
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Registered type tags, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let describe = |map: &BTreeMap<String, Arc<dyn ValueComparator>>| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.describe()))
                .collect::<BTreeMap<_, _>>()
        };
        f.debug_struct("ComparatorRegistry")
            .field("fields", &describe(&self.fields))
            .field("types", &describe(&self.types))
            .finish()
    }
}
