use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparator::{AlwaysEqual, AtPrecision, SymmetricInstant};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::ComparatorRegistry;

/// A declaratively configured comparator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "comparator", rename_all = "snake_case")]
pub enum ComparatorSpec {
    /// [`AtPrecision`] with the given tolerance.
    Precision { tolerance: f64 },
    /// [`SymmetricInstant`].
    SymmetricInstant,
    /// [`AlwaysEqual`]: the path or type is ignored.
    Ignore,
}

/// Declarative registry configuration, usually read from TOML:
///
/// ```toml
/// defaults = true
///
/// [fields."home.address.number"]
/// comparator = "precision"
/// tolerance = 10
///
/// [types.DateTime]
/// comparator = "symmetric_instant"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Start from [`ComparatorRegistry::with_defaults`] instead of empty.
    pub defaults: bool,
    /// Comparators keyed by dotted field path.
    pub fields: BTreeMap<String, ComparatorSpec>,
    /// Comparators keyed by type or ancestor tag.
    pub types: BTreeMap<String, ComparatorSpec>,
}

impl RegistryConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> RegistryResult<Self> {
        toml::from_str(text).map_err(|e| RegistryError::Config(e.to_string()))
    }

    /// Check every precision tolerance is finite and non-negative.
    pub fn validate(&self) -> RegistryResult<()> {
        let all = self.fields.iter().chain(self.types.iter());
        for (target, spec) in all {
            if let ComparatorSpec::Precision { tolerance } = spec {
                if !tolerance.is_finite() || *tolerance < 0.0 {
                    return Err(RegistryError::InvalidTolerance {
                        target: target.clone(),
                        tolerance: *tolerance,
                    });
                }
            }
        }
        Ok(())
    }
}

fn install(registry: &mut ComparatorRegistry, target: &str, spec: &ComparatorSpec, field: bool) {
    match (spec, field) {
        (ComparatorSpec::Precision { tolerance }, true) => {
            registry.register_field(target, AtPrecision::new(*tolerance))
        }
        (ComparatorSpec::Precision { tolerance }, false) => {
            registry.register_type(target, AtPrecision::new(*tolerance))
        }
        (ComparatorSpec::SymmetricInstant, true) => {
            registry.register_field(target, SymmetricInstant)
        }
        (ComparatorSpec::SymmetricInstant, false) => {
            registry.register_type(target, SymmetricInstant)
        }
        (ComparatorSpec::Ignore, true) => registry.register_field(target, AlwaysEqual),
        (ComparatorSpec::Ignore, false) => registry.register_type(target, AlwaysEqual),
    }
}

impl ComparatorRegistry {
    /// Build a registry from declarative configuration.
    pub fn from_config(config: &RegistryConfig) -> RegistryResult<Self> {
        config.validate()?;
        let mut registry = if config.defaults {
            Self::with_defaults()
        } else {
            Self::new()
        };
        for (path, spec) in &config.fields {
            install(&mut registry, path, spec, true);
        }
        for (type_name, spec) in &config.types {
            install(&mut registry, type_name, spec, false);
        }
        debug!(
            fields = config.fields.len(),
            types = config.types.len(),
            defaults = config.defaults,
            "comparator registry configured"
        );
        Ok(registry)
    }
}
