//! The shape capability: how a value describes itself to the engine.
//!
//! The engine never inspects concrete types. Every traversed value is a
//! `&dyn Inspect` which reports its [`Shape`] (category plus borrowed
//! children), its [`Lineage`] and its [`Identity`].

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::identity::{Identity, Lineage};

/// A value the recursive comparison can traverse.
///
/// Implementations exist for primitives, strings, std collections, smart
/// pointers, `Option`, `OnceCell` and calendar instants. Records implement
/// it by listing their fields in declaration order, usually through
/// [`inspect_record!`](crate::inspect_record).
pub trait Inspect {
    /// Structural description of this value.
    fn shape(&self) -> Shape<'_>;

    /// Type tag and linear ancestry of this value.
    fn lineage(&self) -> Lineage;

    /// Reference identity of this value.
    ///
    /// Wrappers that merely point at another value (`Box`, `Rc`, `&T`,
    /// `Some(_)`) must forward so that two handles to one instance agree.
    fn identity(&self) -> Identity {
        Identity::of(self, self.lineage().name)
    }
}

/// Coarse structural category of a [`Shape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Null,
    Scalar,
    Sequence,
    Set,
    Map,
    Record,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Scalar => "scalar",
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::Map => "map",
            Self::Record => "record",
        };
        f.write_str(s)
    }
}

/// Structural description of one value, borrowing its children.
pub enum Shape<'a> {
    /// The absent value.
    Null,
    /// A leaf compared by value.
    Scalar(Scalar<'a>),
    /// Ordered elements compared index by index.
    Sequence(Collection<'a>),
    /// Elements compared as a set, independent of iteration order.
    Set(Collection<'a>),
    /// Key/value entries compared as a set of pairs.
    Map(Entries<'a>),
    /// Named fields in declaration order.
    Record(Vec<Field<'a>>),
}

impl<'a> Shape<'a> {
    pub fn category(&self) -> Category {
        match self {
            Self::Null => Category::Null,
            Self::Scalar(_) => Category::Scalar,
            Self::Sequence(_) => Category::Sequence,
            Self::Set(_) => Category::Set,
            Self::Map(_) => Category::Map,
            Self::Record(_) => Category::Record,
        }
    }

    /// Returns `true` for [`Shape::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Build a record shape from `(name, value)` pairs.
    pub fn record<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a dyn Inspect)>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(name, value)| Field::new(name, value))
                .collect(),
        )
    }

    /// The collection kind, if this shape is a collection or map.
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Self::Sequence(c) | Self::Set(c) => Some(c.kind),
            Self::Map(m) => Some(m.kind),
            _ => None,
        }
    }
}

/// One named field of a record.
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a dyn Inspect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a dyn Inspect) -> Self {
        Self { name, value }
    }
}

/// Elements of a sequence or set.
pub struct Collection<'a> {
    pub kind: Kind,
    pub elements: Vec<&'a dyn Inspect>,
}

impl<'a> Collection<'a> {
    pub fn new(kind: Kind, elements: Vec<&'a dyn Inspect>) -> Self {
        Self { kind, elements }
    }

    /// Collect elements from any iterator of inspectable references.
    pub fn of<T, I>(kind: Kind, iter: I) -> Self
    where
        T: Inspect + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            kind,
            elements: iter.into_iter().map(|e| e as &dyn Inspect).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Entries of a keyed map.
pub struct Entries<'a> {
    pub kind: Kind,
    pub entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>,
}

impl<'a> Entries<'a> {
    pub fn new(kind: Kind, entries: Vec<(&'a dyn Inspect, &'a dyn Inspect)>) -> Self {
        Self { kind, entries }
    }

    /// Collect entries from any iterator of `(&key, &value)` pairs.
    pub fn of<K, V, I>(kind: Kind, iter: I) -> Self
    where
        K: Inspect + 'a,
        V: Inspect + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        Self {
            kind,
            entries: iter
                .into_iter()
                .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iteration-order semantics of a concrete collection kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Positional: `Vec`, arrays, slices, `VecDeque`.
    Indexed,
    /// Deterministic insertion order.
    Insertion,
    /// Ordered by the element's natural ordering.
    Sorted,
    /// No defined iteration order.
    Unordered,
}

/// Concrete collection kind: a display name and its ordering semantics.
///
/// Two collections of the same category but different [`Order`] are never
/// diffed element by element; the kind name is carried into the rendered
/// values so the mismatch is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Kind {
    pub name: &'static str,
    pub order: Order,
}

impl Kind {
    pub const fn new(name: &'static str, order: Order) -> Self {
        Self { name, order }
    }

    /// Returns `true` if both kinds share ordering semantics.
    pub fn same_order(&self, other: &Kind) -> bool {
        self.order == other.order
    }
}

/// A leaf value compared by value equality.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    /// Every integer width widens to `i128`.
    Int(i128),
    Float(f64),
    /// Kept at single precision so it displays as written.
    Float32(f32),
    Char(char),
    Str(&'a str),
    /// A field-less enum value.
    Variant {
        enumeration: &'static str,
        name: &'static str,
    },
    /// A calendar instant, whatever its concrete representation.
    Instant(DateTime<Utc>),
}

impl Scalar<'_> {
    /// Value equality between two scalars.
    ///
    /// Integers compare across widths, NaN equals NaN, integers never equal
    /// floats, and instants compare by the instant they denote.
    pub fn equivalent(&self, other: &Scalar<'_>) -> bool {
        match (*self, *other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Char(a), Scalar::Char(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (
                Scalar::Variant {
                    enumeration: ea,
                    name: na,
                },
                Scalar::Variant {
                    enumeration: eb,
                    name: nb,
                },
            ) => ea == eb && na == nb,
            (Scalar::Instant(a), Scalar::Instant(b)) => a == b,
            (a, b) => match (a.as_float(), b.as_float()) {
                (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
                _ => false,
            },
        }
    }

    /// Floating-point value, widened to `f64`. Integers are not floats.
    fn as_float(&self) -> Option<f64> {
        match *self {
            Scalar::Float(f) => Some(f),
            Scalar::Float32(f) => Some(f64::from(f)),
            _ => None,
        }
    }

    /// Numeric value, for integers and floats.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int(i) => Some(i as f64),
            Self::Float(f) => Some(f),
            Self::Float32(f) => Some(f64::from(f)),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Instant(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Float32(x) => write!(f, "{x:?}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Variant { enumeration, name } => write!(f, "{enumeration}::{name}"),
            Self::Instant(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn integers_compare_across_widths() {
        assert!(Scalar::Int(1).equivalent(&Scalar::Int(1)));
        assert!(!Scalar::Int(1).equivalent(&Scalar::Int(2)));
        assert!(!Scalar::Int(1).equivalent(&Scalar::Float(1.0)));
    }

    #[test]
    fn nan_is_equivalent_to_nan() {
        assert!(Scalar::Float(f64::NAN).equivalent(&Scalar::Float(f64::NAN)));
        assert!(!Scalar::Float(f64::NAN).equivalent(&Scalar::Float(0.0)));
    }

    #[test]
    fn single_precision_floats() {
        assert_eq!(Scalar::Float32(3.1).to_string(), "3.1");
        assert!(Scalar::Float32(2.5).equivalent(&Scalar::Float(2.5)));
        assert!(Scalar::Float(2.5).equivalent(&Scalar::Float32(2.5)));
        assert!(Scalar::Float32(f32::NAN).equivalent(&Scalar::Float32(f32::NAN)));
        assert!(!Scalar::Float32(1.0).equivalent(&Scalar::Int(1)));
        assert_eq!(Scalar::Float32(0.5).as_f64(), Some(0.5));
    }

    #[test]
    fn variants_need_same_enumeration() {
        let a = Scalar::Variant {
            enumeration: "Color",
            name: "Red",
        };
        let b = Scalar::Variant {
            enumeration: "Mood",
            name: "Red",
        };
        assert!(a.equivalent(&a));
        assert!(!a.equivalent(&b));
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(Scalar::Str("%foo").to_string(), "\"%foo\"");
        assert_eq!(Scalar::Char('x').to_string(), "'x'");
        assert_eq!(Scalar::Float(3.0).to_string(), "3.0");
        assert_eq!(Scalar::Int(-7).to_string(), "-7");
    }

    #[test]
    fn instant_display_is_rfc3339() {
        let t = Utc.timestamp_millis_opt(1000).unwrap();
        assert_eq!(Scalar::Instant(t).to_string(), "1970-01-01T00:00:01Z");
    }
}
