//! Dimensioned fact records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;
use crate::value::Value;

/// An immutable record of dimension labels and named scalar values.
///
/// Dimensions locate the fact (which account, which flow, which period);
/// values carry what was measured there. Facts are never mutated in place:
/// transformation and aggregation build new ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub dimensions: BTreeMap<String, String>,
    pub values: BTreeMap<String, Value>,
}

impl Fact {
    /// The identity element of [`Fact::merge`].
    pub const EMPTY: Fact = Fact {
        dimensions: BTreeMap::new(),
        values: BTreeMap::new(),
    };

    #[must_use]
    pub fn new(dimensions: BTreeMap<String, String>, values: BTreeMap<String, Value>) -> Self {
        Self { dimensions, values }
    }

    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&str> {
        self.dimensions.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// True when the fact equals [`Fact::EMPTY`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.values.is_empty()
    }

    /// A fact takes part in mapping only when it carries at least one
    /// dimension.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        !self.dimensions.is_empty()
    }

    /// Folds two facts sharing a dimension set into one.
    ///
    /// [`Fact::EMPTY`] is the identity on either side. Otherwise both facts
    /// must carry the exact same dimensions; the result keeps them and
    /// unions the values by name. A key present on both sides combines per
    /// type: numbers sum, booleans AND, equal text collapses to one copy and
    /// differing text concatenates left-to-right with a separating space
    /// (merge order is observable for text).
    pub fn merge(&self, other: &Fact) -> Result<Fact, MergeError> {
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }
        if self.dimensions != other.dimensions {
            return Err(MergeError::DimensionMismatch {
                left: describe_dimensions(&self.dimensions),
                right: describe_dimensions(&other.dimensions),
            });
        }

        let mut values = self.values.clone();
        for (key, right) in &other.values {
            let combined = match values.get(key) {
                None => right.clone(),
                Some(left) => combine(key, left, right)?,
            };
            values.insert(key.clone(), combined);
        }
        Ok(Fact {
            dimensions: self.dimensions.clone(),
            values,
        })
    }
}

fn combine(key: &str, left: &Value, right: &Value) -> Result<Value, MergeError> {
    match (left, right) {
        (Value::Text(l), Value::Text(r)) => Ok(Value::Text(if l == r {
            l.clone()
        } else {
            format!("{l} {r}")
        })),
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(*l && *r)),
        (Value::Timestamp(_), Value::Timestamp(_)) => Err(MergeError::UnsupportedValueType {
            key: key.to_string(),
            kind: left.kind(),
        }),
        _ => Err(MergeError::ValueTypeMismatch {
            key: key.to_string(),
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

fn describe_dimensions(dimensions: &BTreeMap<String, String>) -> String {
    let pairs: Vec<String> = dimensions
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
