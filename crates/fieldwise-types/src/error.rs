use std::collections::BTreeSet;

use thiserror::Error;

use crate::path::Path;

/// The expected value's shape lacks fields that the actual value declares.
///
/// This is not a [`Difference`](crate::Difference): the two records are not
/// comparable at all, so the comparison stops as soon as it is detected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "{expected_type} does not declare all {actual_type} fields: [{}]",
    .missing_fields.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
)]
pub struct TypeMismatch {
    /// Lineage name of the actual record.
    pub actual_type: String,
    /// Lineage name of the expected record.
    pub expected_type: String,
    /// Field names declared by actual but absent from expected.
    pub missing_fields: BTreeSet<String>,
    /// Where the two records were found.
    pub path: Path,
}

impl TypeMismatch {
    pub fn new(
        actual_type: impl Into<String>,
        expected_type: impl Into<String>,
        missing_fields: BTreeSet<String>,
        path: Path,
    ) -> Self {
        Self {
            actual_type: actual_type.into(),
            expected_type: expected_type.into(),
            missing_fields,
            path,
        }
    }

    /// Returns `true` if `field` is among the missing fields.
    pub fn is_missing(&self, field: &str) -> bool {
        self.missing_fields.contains(field)
    }
}
