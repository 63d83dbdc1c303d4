//! Foundation types for Fieldwise.
//!
//! This crate provides the data model shared by the comparator registry and
//! the recursive comparison engine. Every other Fieldwise crate depends on
//! `fieldwise-types`.
//!
//! # Key Types
//!
//! - [`Inspect`] -- Shape capability: how a value describes itself to the engine
//! - [`Shape`] / [`Scalar`] / [`Kind`] -- Structural description of one value
//! - [`Lineage`] -- Type tag plus linear ancestor chain for comparator fallback
//! - [`Identity`] -- Reference identity used for short-circuits and cycle guards
//! - [`Path`] / [`Segment`] -- Location of a difference inside the graphs
//! - [`Difference`] / [`DifferenceSet`] -- Comparison output
//! - [`TypeMismatch`] -- Hard failure when expected lacks fields actual declares

pub mod difference;
pub mod error;
pub mod identity;
mod impls;
mod macros;
pub mod path;
pub mod shape;
pub mod temporal;

pub use difference::{Difference, DifferenceSet, Rendered};
pub use error::TypeMismatch;
pub use identity::{Identity, Lineage};
pub use path::{Path, Segment};
pub use shape::{Category, Collection, Entries, Field, Inspect, Kind, Order, Scalar, Shape};
