//! Error types for fact aggregation.

use thiserror::Error;

/// Errors raised by [`Fact::merge`](crate::Fact::merge).
///
/// Every variant points at a rule-table authoring defect affecting a whole
/// aggregation group, so callers abort the batch rather than recover per
/// fact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Merge attempted across facts with non-identical dimension sets.
    #[error("cannot aggregate facts with different dimensions: {left} vs {right}")]
    DimensionMismatch { left: String, right: String },
    /// Both sides carry the key with different runtime types.
    #[error("cannot aggregate value '{key}': type mismatch ({left} vs {right})")]
    ValueTypeMismatch {
        key: String,
        left: &'static str,
        right: &'static str,
    },
    /// The value type has no defined combination.
    #[error("cannot aggregate value '{key}': {kind} values are not combinable")]
    UnsupportedValueType { key: String, kind: &'static str },
}
