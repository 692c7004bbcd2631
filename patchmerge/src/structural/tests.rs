//! Tests for the structural value model.

use std::collections::{BTreeMap, HashMap};

use rstest::rstest;

use super::*;

#[rstest]
#[case::zero_int(&0_i32, true)]
#[case::int(&7_u16, false)]
#[case::false_bool(&false, true)]
#[case::true_bool(&true, false)]
#[case::empty_string(&String::new(), true)]
#[case::string(&String::from("web"), false)]
#[case::zero_float(&0.0_f64, true)]
#[case::none(&Option::<String>::None, true)]
#[case::some_empty(&Some(String::new()), false)]
#[case::empty_vec(&Vec::<u8>::new(), true)]
fn emptiness_matches_zero_values(#[case] value: &dyn Structural, #[case] empty: bool) {
    assert_eq!(value.is_empty_value(), empty);
}

#[rstest]
fn scalars_expose_their_value() {
    assert_eq!(42_u8.scalar(), Some(Scalar::UInt(42)));
    assert_eq!((-3_i64).scalar(), Some(Scalar::Int(-3)));
    assert_eq!(String::from("x").scalar(), Some(Scalar::Str("x")));
    assert_eq!(Vec::<u8>::new().scalar(), None);
}

#[rstest]
fn sequences_expose_elements_in_order() {
    let values = vec![String::from("a"), String::from("b")];
    let names: Vec<_> = values
        .elements()
        .into_iter()
        .filter_map(Structural::scalar)
        .collect();
    assert_eq!(names, vec![Scalar::Str("a"), Scalar::Str("b")]);
}

#[rstest]
fn hash_map_entries_are_sorted() {
    let map: HashMap<String, u8> = [("b".into(), 2), ("a".into(), 1), ("c".into(), 3)]
        .into_iter()
        .collect();
    let keys: Vec<_> = map.entries().into_iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[rstest]
fn btree_map_reports_mapping_kind() {
    let map: BTreeMap<u32, String> = BTreeMap::from([(1, "one".into())]);
    assert_eq!(map.kind(), Kind::Mapping);
    assert_eq!(map.entries().len(), 1);
}

#[rstest]
fn resolve_unwraps_nested_options() {
    let value = Some(Some(String::from("deep")));
    let resolved = resolve(&value).and_then(Structural::scalar);
    assert_eq!(resolved, Some(Scalar::Str("deep")));

    let absent: Option<Option<String>> = Some(None);
    assert!(resolve(&absent).is_none());
}
