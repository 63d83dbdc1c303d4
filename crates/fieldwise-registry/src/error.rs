//! Error types for the registry crate.

/// Errors that can occur while building a registry from configuration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    /// The configuration text could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A precision comparator was configured with a tolerance that is
    /// negative or not finite.
    #[error("invalid tolerance {tolerance} for '{target}'")]
    InvalidTolerance { target: String, tolerance: f64 },
}

/// Convenience alias for registry results.
pub type RegistryResult<T> = Result<T, RegistryError>;
