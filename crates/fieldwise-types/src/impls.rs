//! [`Inspect`] implementations for primitives, strings, pointers and std
//! collections.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::identity::{Identity, Lineage};
use crate::shape::{Collection, Entries, Inspect, Kind, Order, Scalar, Shape};

const INTEGER: &[&str] = &["integer", "number"];
const FLOAT: &[&str] = &["float", "number"];
const STRING: &[&str] = &["string"];
const SEQUENCE: &[&str] = &["sequence"];
const SET: &[&str] = &["set"];
const MAP: &[&str] = &["map"];

macro_rules! inspect_integers {
    ($($t:ty),* $(,)?) => {
        $(
            impl Inspect for $t {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Int(*self as i128))
                }

                fn lineage(&self) -> Lineage {
                    Lineage::new(stringify!($t), INTEGER)
                }
            }
        )*
    };
}

inspect_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Inspect for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("f64", FLOAT)
    }
}

impl Inspect for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float32(*self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("f32", FLOAT)
    }
}

impl Inspect for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::leaf("bool")
    }
}

impl Inspect for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::leaf("char")
    }
}

impl Inspect for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("str", STRING)
    }
}

impl Inspect for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self.as_str()))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("String", STRING)
    }
}

// Pointers forward everything, identity included.

macro_rules! inspect_pointers {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Inspect + ?Sized> Inspect for $ptr<T> {
                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn lineage(&self) -> Lineage {
                    (**self).lineage()
                }

                fn identity(&self) -> Identity {
                    (**self).identity()
                }
            }
        )*
    };
}

inspect_pointers!(Box, Rc, Arc);

impl<T: Inspect + ?Sized> Inspect for &T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn lineage(&self) -> Lineage {
        (**self).lineage()
    }

    fn identity(&self) -> Identity {
        (**self).identity()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn lineage(&self) -> Lineage {
        match self {
            Some(value) => value.lineage(),
            None => Lineage::NULL,
        }
    }

    fn identity(&self) -> Identity {
        match self {
            Some(value) => value.identity(),
            None => Identity::of(self, Lineage::NULL.name),
        }
    }
}

/// An unset cell is null; a set cell is its value. Cells let tests and
/// callers tie cyclic graphs after construction.
impl<T: Inspect> Inspect for OnceCell<T> {
    fn shape(&self) -> Shape<'_> {
        match self.get() {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn lineage(&self) -> Lineage {
        match self.get() {
            Some(value) => value.lineage(),
            None => Lineage::NULL,
        }
    }

    fn identity(&self) -> Identity {
        match self.get() {
            Some(value) => value.identity(),
            None => Identity::of(self, Lineage::NULL.name),
        }
    }
}

// Collections.

impl<T: Inspect> Inspect for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Collection::of(Kind::new("Vec", Order::Indexed), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("Vec", SEQUENCE)
    }
}

impl<T: Inspect> Inspect for VecDeque<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Collection::of(Kind::new("VecDeque", Order::Indexed), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("VecDeque", SEQUENCE)
    }
}

impl<T: Inspect> Inspect for [T] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Collection::of(Kind::new("slice", Order::Indexed), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("slice", SEQUENCE)
    }
}

impl<T: Inspect, const N: usize> Inspect for [T; N] {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Collection::of(Kind::new("array", Order::Indexed), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("array", SEQUENCE)
    }
}

impl<T: Inspect> Inspect for BTreeSet<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(Collection::of(Kind::new("BTreeSet", Order::Sorted), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("BTreeSet", SET)
    }
}

impl<T: Inspect, S: BuildHasher> Inspect for HashSet<T, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Set(Collection::of(Kind::new("HashSet", Order::Unordered), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("HashSet", SET)
    }
}

impl<K: Inspect, V: Inspect> Inspect for BTreeMap<K, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(Entries::of(Kind::new("BTreeMap", Order::Sorted), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("BTreeMap", MAP)
    }
}

impl<K: Inspect, V: Inspect, S: BuildHasher> Inspect for HashMap<K, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(Entries::of(Kind::new("HashMap", Order::Unordered), self))
    }

    fn lineage(&self) -> Lineage {
        Lineage::new("HashMap", MAP)
    }
}
