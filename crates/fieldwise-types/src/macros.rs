/// Implement [`Inspect`](crate::Inspect) for a record type.
///
/// Fields are listed in declaration order; that order drives traversal.
/// An optional bracketed list declares the linear ancestry used for type
/// comparator fallback, nearest first.
///
/// ```rust
/// use fieldwise_types::{inspect_record, Inspect};
///
/// struct Person { name: String, age: u32 }
/// struct Giant { name: String, age: u32, height: f64 }
///
/// inspect_record!(Person { name, age });
/// inspect_record!(Giant: ["Person"] { name, age, height });
///
/// let goliath = Giant { name: "Goliath".into(), age: 30, height: 3.0 };
/// assert!(goliath.lineage().descends_from("Person"));
/// ```
#[macro_export]
macro_rules! inspect_record {
    ($ty:ident $(: [$($ancestor:literal),* $(,)?])? { $($field:ident),* $(,)? }) => {
        impl $crate::Inspect for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(::std::vec![
                    $($crate::Field::new(::std::stringify!($field), &self.$field)),*
                ])
            }

            fn lineage(&self) -> $crate::Lineage {
                $crate::Lineage::new(::std::stringify!($ty), &[$($($ancestor),*)?])
            }
        }
    };
}

/// Implement [`Inspect`](crate::Inspect) for a field-less enum.
///
/// Each value becomes a [`Scalar::Variant`](crate::Scalar::Variant).
#[macro_export]
macro_rules! inspect_enum {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl $crate::Inspect for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                let name = match self {
                    $(Self::$variant => ::std::stringify!($variant)),*
                };
                $crate::Shape::Scalar($crate::Scalar::Variant {
                    enumeration: ::std::stringify!($ty),
                    name,
                })
            }

            fn lineage(&self) -> $crate::Lineage {
                $crate::Lineage::new(::std::stringify!($ty), &["enum"])
            }
        }
    };
}
