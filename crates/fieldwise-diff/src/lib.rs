//! Recursive comparison engine for Fieldwise.
//!
//! Walks two value graphs in lock-step and produces the ordered set of
//! structural differences between them, honouring per-path and per-type
//! comparator overrides from a
//! [`ComparatorRegistry`](fieldwise_registry::ComparatorRegistry).
//! Cyclic graphs terminate through an identity-pair visited set.
//!
//! # Key Types
//!
//! - [`RecursiveComparison`] / [`compare`] -- Entry points
//! - [`EngineConfig`] -- Rendering and path options
//! - [`CompareError`] -- Hard failure when records are not comparable
//! - [`VisitedPairs`] -- Cycle guard
//! - [`Renderer`] -- Cycle-safe value rendering for differences
//!
//! # Quick Start
//!
//! ```rust
//! use fieldwise_diff::compare;
//! use fieldwise_registry::ComparatorRegistry;
//! use fieldwise_types::inspect_record;
//!
//! struct Address { number: i32 }
//! struct Home { address: Address }
//! inspect_record!(Address { number });
//! inspect_record!(Home { address });
//!
//! let actual = Home { address: Address { number: 1 } };
//! let expected = Home { address: Address { number: 2 } };
//!
//! let differences = compare(&actual, &expected, &ComparatorRegistry::new()).unwrap();
//! assert_eq!(differences.paths(), vec!["address.number"]);
//! ```

pub mod collector;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod visited;

pub use collector::DifferenceCollector;
pub use config::EngineConfig;
pub use engine::{compare, RecursiveComparison};
pub use error::{CompareError, CompareResult};
pub use render::Renderer;
pub use visited::VisitedPairs;
