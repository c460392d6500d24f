#![deny(unsafe_code)]

//! Core data model for the ledger mapping engine.
//!
//! A [`Fact`] is an immutable record of dimension labels (account, flow,
//! period, ...) and named scalar [`Value`]s. Facts that share a dimension set
//! can be folded into one via [`Fact::merge`], the aggregation step of the
//! mapping pipeline.

pub mod error;
pub mod fact;
pub mod value;

pub use error::MergeError;
pub use fact::Fact;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_serializes() {
        let mut fact = Fact::default();
        fact.dimensions
            .insert("ACC".to_string(), "RESERVE".to_string());
        fact.values
            .insert("amount".to_string(), Value::Number(1000.0));

        let json = serde_json::to_string(&fact).expect("serialize fact");
        let round: Fact = serde_json::from_str(&json).expect("deserialize fact");
        assert_eq!(round, fact);
    }

    #[test]
    fn value_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Value::Bool(true)).expect("serialize value");
        assert!(json.contains("kind"));
        let round: Value = serde_json::from_str(&json).expect("deserialize value");
        assert_eq!(round, Value::Bool(true));
    }
}
