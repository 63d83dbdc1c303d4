//! Error types for the diff crate.

use fieldwise_types::TypeMismatch;

/// Errors that abort a recursive comparison.
///
/// Value mismatches are never errors; they accumulate in the returned
/// [`DifferenceSet`](fieldwise_types::DifferenceSet).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// Expected lacks fields that actual declares.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
}

impl CompareError {
    /// The missing field names, for reporters.
    pub fn missing_fields(&self) -> Vec<&str> {
        match self {
            Self::TypeMismatch(mismatch) => {
                mismatch.missing_fields.iter().map(String::as_str).collect()
            }
        }
    }
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
