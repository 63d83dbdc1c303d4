//! Comparator registry for Fieldwise.
//!
//! Callers register equality overrides before a comparison run; the engine
//! consults the registry read-only at every traversal point. An exact field
//! path beats the value's own type, which beats its nearest registered
//! ancestor.
//!
//! # Quick Start
//!
//! ```rust
//! use fieldwise_registry::{AtPrecision, ComparatorRegistry, Origin};
//! use fieldwise_types::Inspect;
//!
//! let registry = ComparatorRegistry::new()
//!     .with_field("height", AtPrecision::new(0.2))
//!     .with_type("number", AtPrecision::new(0.5));
//!
//! let resolved = registry.resolve("height", &3.0f64.lineage()).unwrap();
//! assert_eq!(resolved.origin, Origin::Field);
//! assert!(resolved.comparator.equivalent(&3.0f64, &3.1f64));
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod registry;

pub use comparator::{AlwaysEqual, AtPrecision, NeverEqual, SymmetricInstant, ValueComparator};
pub use config::{ComparatorSpec, RegistryConfig};
pub use error::{RegistryError, RegistryResult};
pub use registry::{ComparatorRegistry, Origin, Resolved};
