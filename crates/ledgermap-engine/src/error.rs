//! Error types for rule construction and batch mapping.

use ledgermap_model::MergeError;
use thiserror::Error;

/// A literal dimension pattern failed to compile.
#[derive(Debug, Clone, Error)]
#[error("invalid dimension pattern '{pattern}'")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Errors surfaced by rule transforms and batch execution.
///
/// A fact that matches no rule is NOT an error: the engine routes it to the
/// unmapped set and carries on. The variants here abort the whole call
/// because they indicate a broken rule table or data contract, not a single
/// odd record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A values transform needed a value key the source fact does not carry.
    #[error("rule received invalid data: missing source value '{field}'")]
    MissingSourceField { field: String },
    /// Aggregating transformed facts onto a shared target failed.
    #[error(transparent)]
    Merge(#[from] MergeError),
}
