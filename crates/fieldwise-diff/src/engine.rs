//! The recursive comparison: walks two value graphs in lock-step.
//!
//! For every visited `(path, actual, expected)` the engine applies, in
//! order: the identity short-circuit, the cycle guard, null handling,
//! comparator overrides, scalar equivalence, and finally structural
//! descent by category.
//!
//! # Invariants
//!
//! - A comparator verdict is terminal: nothing beneath an overridden path
//!   is compared.
//! - Composite pairs are entered into the visited set before descent and
//!   never removed, so every identity pair is visited at most once.
//! - A missing field aborts the whole comparison; value mismatches never
//!   do.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use fieldwise_registry::ComparatorRegistry;
use fieldwise_types::{
    Collection, Difference, DifferenceSet, Entries, Field, Inspect, Kind, Order, Path, Scalar,
    Shape, TypeMismatch,
};

use crate::collector::DifferenceCollector;
use crate::config::EngineConfig;
use crate::error::{CompareError, CompareResult};
use crate::render::Renderer;
use crate::visited::VisitedPairs;

/// Compare `actual` against `expected` with the overrides in `registry`
/// and the default [`EngineConfig`].
pub fn compare<A, E>(
    actual: &A,
    expected: &E,
    registry: &ComparatorRegistry,
) -> CompareResult<DifferenceSet>
where
    A: Inspect,
    E: Inspect,
{
    RecursiveComparison::new(registry).compare(actual, expected)
}

/// A configured recursive comparison, reusable across many value pairs.
///
/// Each call to [`compare`](Self::compare) owns a fresh visited set and
/// collector, so one instance (and one registry) may serve concurrent
/// comparisons.
#[derive(Clone, Debug)]
pub struct RecursiveComparison<'r> {
    registry: &'r ComparatorRegistry,
    config: EngineConfig,
}

impl<'r> RecursiveComparison<'r> {
    pub fn new(registry: &'r ComparatorRegistry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ComparatorRegistry {
        self.registry
    }

    /// Produce the ordered differences between `actual` and `expected`.
    ///
    /// Returns `Err(CompareError::TypeMismatch)` as soon as a record in
    /// `expected` is found lacking a field its `actual` counterpart
    /// declares.
    pub fn compare(
        &self,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
    ) -> CompareResult<DifferenceSet> {
        debug!(
            actual = %actual.lineage(),
            expected = %expected.lineage(),
            "recursive comparison started"
        );
        let mut traversal = Traversal::new(self.registry, &self.config, VisitedPairs::new(), false);
        traversal.visit(&Path::root(), actual, expected)?;
        let visited = traversal.visited.len();
        let differences = traversal.collector.finish();
        debug!(
            differences = differences.len(),
            visited,
            "recursive comparison finished"
        );
        Ok(differences)
    }

    /// Returns `true` if the comparison finds no difference.
    pub fn is_deeply_equal(
        &self,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
    ) -> CompareResult<bool> {
        self.compare(actual, expected).map(|d| d.is_empty())
    }
}

/// State of one traversal.
///
/// A probing traversal answers "equal or not" for set membership and map
/// key matching: it stops at the first difference and renders nothing.
struct Traversal<'e> {
    registry: &'e ComparatorRegistry,
    config: &'e EngineConfig,
    renderer: Renderer,
    visited: VisitedPairs,
    collector: DifferenceCollector,
    probing: bool,
    unequal: bool,
}

impl<'e> Traversal<'e> {
    fn new(
        registry: &'e ComparatorRegistry,
        config: &'e EngineConfig,
        visited: VisitedPairs,
        probing: bool,
    ) -> Self {
        Self {
            registry,
            config,
            renderer: Renderer::from_config(config),
            visited,
            collector: DifferenceCollector::new(),
            probing,
            unequal: false,
        }
    }

    fn visit(
        &mut self,
        path: &Path,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
    ) -> CompareResult<()> {
        if self.probing && self.unequal {
            return Ok(());
        }

        let (actual_id, expected_id) = (actual.identity(), expected.identity());
        if actual_id == expected_id {
            return Ok(());
        }
        if self.visited.contains(actual_id, expected_id) {
            trace!(%path, "pair already visited");
            return Ok(());
        }

        let actual_shape = actual.shape();
        let expected_shape = expected.shape();
        let field_path = path.field_path();

        match (actual_shape.is_null(), expected_shape.is_null()) {
            (true, true) => return Ok(()),
            (true, false) | (false, true) => {
                let lineage = if actual_shape.is_null() {
                    expected.lineage()
                } else {
                    actual.lineage()
                };
                let accepted = self
                    .registry
                    .resolve(&field_path, &lineage)
                    .is_some_and(|r| r.comparator.equivalent(actual, expected));
                if !accepted {
                    self.emit(path, actual, expected);
                }
                return Ok(());
            }
            (false, false) => {}
        }

        if let Some(resolved) = self.registry.resolve(&field_path, &actual.lineage()) {
            let equal = resolved.comparator.equivalent(actual, expected);
            trace!(
                %path,
                comparator = %resolved.comparator.describe(),
                origin = ?resolved.origin,
                equal,
                "comparator override"
            );
            if !equal {
                self.emit(path, actual, expected);
            }
            return Ok(());
        }

        match (actual_shape, expected_shape) {
            (Shape::Scalar(a), Shape::Scalar(e)) => {
                if !self.scalars_match(&a, &e, actual, expected) {
                    self.emit(path, actual, expected);
                }
            }
            (Shape::Record(a), Shape::Record(e)) => {
                self.visited.enter(actual_id, expected_id);
                self.visit_record(path, actual, expected, &a, &e)?;
            }
            (Shape::Sequence(a), Shape::Sequence(e)) => {
                if !a.kind.same_order(&e.kind) {
                    self.emit_kind_mismatch(path, actual, expected, a.kind, e.kind);
                } else {
                    self.visited.enter(actual_id, expected_id);
                    self.visit_sequence(path, actual, expected, &a, &e)?;
                }
            }
            (Shape::Set(a), Shape::Set(e)) => {
                if !a.kind.same_order(&e.kind) {
                    self.emit_kind_mismatch(path, actual, expected, a.kind, e.kind);
                } else {
                    self.visited.enter(actual_id, expected_id);
                    if !self.same_elements(path, &a, &e) {
                        self.emit(path, actual, expected);
                    }
                }
            }
            (Shape::Map(a), Shape::Map(e)) => {
                if !a.kind.same_order(&e.kind) {
                    self.emit_kind_mismatch(path, actual, expected, a.kind, e.kind);
                } else {
                    self.visited.enter(actual_id, expected_id);
                    self.visit_map(path, actual, expected, &a, &e)?;
                }
            }
            (a, e) => {
                trace!(
                    %path,
                    actual = %a.category(),
                    expected = %e.category(),
                    "category mismatch"
                );
                self.emit(path, actual, expected);
            }
        }
        Ok(())
    }

    fn scalars_match(
        &self,
        a: &Scalar<'_>,
        e: &Scalar<'_>,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
    ) -> bool {
        if a.is_instant()
            && e.is_instant()
            && !self.config.compare_instants_across_types
            && actual.lineage().name != expected.lineage().name
        {
            return false;
        }
        a.equivalent(e)
    }

    /// Descend field by field in actual's declaration order.
    fn visit_record(
        &mut self,
        path: &Path,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
        actual_fields: &[Field<'_>],
        expected_fields: &[Field<'_>],
    ) -> CompareResult<()> {
        let mut pairs = Vec::with_capacity(actual_fields.len());
        let mut missing = BTreeSet::new();
        for field in actual_fields {
            match expected_fields.iter().find(|f| f.name == field.name) {
                Some(counterpart) => pairs.push((field.name, field.value, counterpart.value)),
                None => {
                    missing.insert(field.name.to_string());
                }
            }
        }

        if !missing.is_empty() {
            let mismatch = TypeMismatch::new(
                actual.lineage().name,
                expected.lineage().name,
                missing,
                path.clone(),
            );
            debug!(%path, error = %mismatch, "aborting comparison");
            return Err(mismatch.into());
        }

        for (name, a, e) in pairs {
            self.visit(&path.field(name), a, e)?;
        }
        Ok(())
    }

    /// Same length: element by element. Otherwise one difference for the
    /// whole sequence.
    fn visit_sequence(
        &mut self,
        path: &Path,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
        a: &Collection<'_>,
        e: &Collection<'_>,
    ) -> CompareResult<()> {
        if a.len() != e.len() {
            self.emit(path, actual, expected);
            return Ok(());
        }
        for (index, (ae, ee)) in a.elements.iter().zip(&e.elements).enumerate() {
            let child = if self.config.index_segments {
                path.index(index)
            } else {
                path.clone()
            };
            self.visit(&child, *ae, *ee)?;
        }
        Ok(())
    }

    /// Set equality independent of iteration order.
    fn same_elements(&self, path: &Path, a: &Collection<'_>, e: &Collection<'_>) -> bool {
        if a.len() != e.len() {
            return false;
        }
        let mut used = vec![false; e.len()];
        a.elements.iter().all(|ae| {
            let found = e
                .elements
                .iter()
                .enumerate()
                .find(|(j, ee)| !used[*j] && self.probe(path, *ae, **ee))
                .map(|(j, _)| j);
            match found {
                Some(j) => {
                    used[j] = true;
                    true
                }
                None => false,
            }
        })
    }

    /// Key sets must match; values under shared keys are compared
    /// recursively.
    fn visit_map(
        &mut self,
        path: &Path,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
        a: &Entries<'_>,
        e: &Entries<'_>,
    ) -> CompareResult<()> {
        if a.len() != e.len() {
            self.emit(path, actual, expected);
            return Ok(());
        }

        let mut used = vec![false; e.len()];
        let mut pairs = Vec::with_capacity(a.len());
        for (ak, av) in &a.entries {
            let found = e
                .entries
                .iter()
                .enumerate()
                .find(|(j, (ek, _))| !used[*j] && self.probe(path, *ak, *ek))
                .map(|(j, _)| j);
            let Some(j) = found else {
                trace!(%path, "map key sets differ");
                self.emit(path, actual, expected);
                return Ok(());
            };
            used[j] = true;
            pairs.push((Renderer::key_segment(*ak), *av, e.entries[j].1));
        }

        if a.kind.order == Order::Unordered {
            pairs.sort_by(|x, y| x.0.cmp(&y.0));
        }
        distinct_segments(&mut pairs);
        for (key, av, ev) in pairs {
            self.visit(&path.key(key), av, ev)?;
        }
        Ok(())
    }

    /// Trial comparison on a scratch copy of the visited set.
    ///
    /// Pairs entered during the trial are discarded, so a failed trial can
    /// never make a later pair look already visited. A type mismatch only
    /// means this trial pairing is unequal.
    fn probe(&self, path: &Path, actual: &dyn Inspect, expected: &dyn Inspect) -> bool {
        let mut trial = Traversal::new(self.registry, self.config, self.visited.clone(), true);
        match trial.visit(path, actual, expected) {
            Ok(()) => !trial.unequal,
            Err(CompareError::TypeMismatch(_)) => false,
        }
    }

    fn emit(&mut self, path: &Path, actual: &dyn Inspect, expected: &dyn Inspect) {
        if self.probing {
            self.unequal = true;
            return;
        }
        let mut a = self.renderer.render(actual);
        let mut e = self.renderer.render(expected);
        if a.text() == e.text() {
            a = a.tagged(tag_of(actual));
            e = e.tagged(tag_of(expected));
        }
        self.collector.push(Difference::new(path.clone(), a, e));
    }

    fn emit_kind_mismatch(
        &mut self,
        path: &Path,
        actual: &dyn Inspect,
        expected: &dyn Inspect,
        actual_kind: Kind,
        expected_kind: Kind,
    ) {
        trace!(
            %path,
            actual = actual_kind.name,
            expected = expected_kind.name,
            "collection kind mismatch"
        );
        if self.probing {
            self.unequal = true;
            return;
        }
        let a = self.renderer.render(actual).tagged(actual_kind.name);
        let e = self.renderer.render(expected).tagged(expected_kind.name);
        self.collector.push(Difference::new(path.clone(), a, e));
    }
}

/// Suffix repeated key segments with `#2`, `#3`, ... so that every entry
/// keeps a path of its own.
fn distinct_segments<T>(pairs: &mut [(String, T, T)]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(pairs.len());
    for (segment, _, _) in pairs.iter_mut() {
        if taken.contains(segment.as_str()) {
            let mut n = 2;
            while taken.contains(format!("{segment}#{n}").as_str()) {
                n += 1;
            }
            segment.push_str(&format!("#{n}"));
        }
        taken.insert(segment.clone());
    }
}

/// Collection kind name, or the type tag for everything else.
fn tag_of(value: &dyn Inspect) -> &'static str {
    match value.shape().kind() {
        Some(kind) => kind.name,
        None => value.lineage().name,
    }
}
