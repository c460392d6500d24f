use std::collections::BTreeMap;

use chrono::DateTime;
use ledgermap_model::{Fact, MergeError, Value};

fn dims(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect()
}

fn values(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

fn valued(pairs: &[(&str, Value)]) -> Fact {
    Fact::new(BTreeMap::new(), values(pairs))
}

#[test]
fn empty_is_the_identity_element() {
    let fact = Fact::new(dims(&[("DIM1", "1")]), values(&[("VAL1", Value::from("A"))]));

    assert_eq!(fact.merge(&Fact::EMPTY).unwrap(), fact);
    assert_eq!(Fact::EMPTY.merge(&fact).unwrap(), fact);
    assert_eq!(Fact::EMPTY.merge(&Fact::EMPTY).unwrap(), Fact::EMPTY);
}

#[test]
fn different_dimensions_cannot_merge() {
    let left = Fact::new(dims(&[("DIM1", "Val1")]), BTreeMap::new());

    for other in [
        Fact::new(dims(&[("DIM2", "Val2")]), BTreeMap::new()),
        Fact::new(dims(&[("DIM1", "Val2")]), BTreeMap::new()),
        Fact::new(dims(&[("DIM2", "Val1")]), BTreeMap::new()),
    ] {
        let err = left.merge(&other).unwrap_err();
        assert!(matches!(err, MergeError::DimensionMismatch { .. }));
    }
}

#[test]
fn disjoint_value_names_union() {
    let merged = valued(&[("Prop1", Value::from(3.0))])
        .merge(&valued(&[("Prop2", Value::from(4.0))]))
        .unwrap();

    assert_eq!(
        merged,
        valued(&[("Prop1", Value::from(3.0)), ("Prop2", Value::from(4.0))])
    );
}

#[test]
fn conflicting_value_types_cannot_merge() {
    let err = valued(&[("Prop", Value::from("3"))])
        .merge(&valued(&[("Prop", Value::from(4.0))]))
        .unwrap_err();

    assert_eq!(
        err,
        MergeError::ValueTypeMismatch {
            key: "Prop".to_string(),
            left: "text",
            right: "number",
        }
    );
}

#[test]
fn numbers_sum() {
    let merged = valued(&[("Prop", Value::from(3.0))])
        .merge(&valued(&[("Prop", Value::from(4.0))]))
        .unwrap();

    assert_eq!(merged, valued(&[("Prop", Value::from(7.0))]));
}

#[test]
fn differing_text_concatenates_with_a_space() {
    let merged = valued(&[("Prop", Value::from("Ceci est"))])
        .merge(&valued(&[("Prop", Value::from("un texte"))]))
        .unwrap();

    assert_eq!(merged, valued(&[("Prop", Value::from("Ceci est un texte"))]));
}

#[test]
fn text_concatenation_is_not_commutative() {
    let left = valued(&[("Prop", Value::from("a"))]);
    let right = valued(&[("Prop", Value::from("b"))]);

    assert_eq!(
        left.merge(&right).unwrap(),
        valued(&[("Prop", Value::from("a b"))])
    );
    assert_eq!(
        right.merge(&left).unwrap(),
        valued(&[("Prop", Value::from("b a"))])
    );
}

#[test]
fn equal_text_collapses_to_one_copy() {
    let fact = valued(&[("Prop", Value::from("Ceci est un texte"))]);

    assert_eq!(fact.merge(&fact.clone()).unwrap(), fact);
}

#[test]
fn booleans_and_together() {
    let merged = valued(&[("Prop", Value::from(true))])
        .merge(&valued(&[("Prop", Value::from(false))]))
        .unwrap();

    assert_eq!(merged, valued(&[("Prop", Value::from(false))]));
}

#[test]
fn timestamps_are_not_combinable() {
    let instant = Value::Timestamp(DateTime::UNIX_EPOCH);
    let err = valued(&[("Prop", instant.clone())])
        .merge(&valued(&[("Prop", instant)]))
        .unwrap_err();

    assert_eq!(
        err,
        MergeError::UnsupportedValueType {
            key: "Prop".to_string(),
            kind: "timestamp",
        }
    );
}

#[test]
fn merge_keeps_the_shared_dimensions() {
    let destination = dims(&[("D_CA", "C"), ("D_CU", "EUR")]);
    let left = Fact::new(destination.clone(), values(&[("p", Value::from(2000.0))]));
    let right = Fact::new(destination.clone(), values(&[("p", Value::from(-1000.0))]));

    let merged = left.merge(&right).unwrap();
    assert_eq!(merged.dimensions, destination);
    assert_eq!(merged.value("p"), Some(&Value::Number(1000.0)));
}
