use crate::value::Value;
use proptest::prelude::*;
use serde_json::json;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

// ---- text --------------------------------------------------------------

#[test]
fn text_matches_case_insensitive_substring() {
    let stored = v_txt("Miss Campos");

    assert!(stored.matches(&v_txt("miss campos")));
    assert!(stored.matches(&v_txt("CAMP")));
    assert!(stored.matches(&v_txt("s C")));
    assert!(!stored.matches(&v_txt("Campus")));
}

#[test]
fn empty_search_never_matches_text() {
    assert!(!v_txt("anything").matches(&v_txt("")));
    assert!(!v_txt("").matches(&v_txt("")));
}

#[test]
fn text_matches_scalar_search_by_display() {
    let stored = v_txt("2016-05-21T11:10:28 -10:00");

    assert!(stored.matches(&Value::Int(2016)));
    assert!(stored.matches(&Value::Int(10)));
    assert!(!stored.matches(&Value::Int(2017)));
    assert!(v_txt("Flag: TRUE").matches(&Value::Bool(true)));
}

#[test]
fn null_search_never_matches_text() {
    assert!(!v_txt("x").matches(&Value::Null));
}

#[test]
fn text_folding_handles_non_ascii() {
    assert!(v_txt("Ärger im Büro").matches(&v_txt("ärger")));
    assert!(v_txt("ÉCOLE").matches(&v_txt("école")));
}

// ---- scalars -----------------------------------------------------------

#[test]
fn bool_matches_by_equality_only() {
    assert!(Value::Bool(false).matches(&Value::Bool(false)));
    assert!(!Value::Bool(false).matches(&Value::Bool(true)));
    assert!(!Value::Bool(true).matches(&v_txt("true")));
    assert!(!Value::Bool(true).matches(&Value::Int(1)));
}

#[test]
fn int_matches_by_equality() {
    assert!(Value::Int(105).matches(&Value::Int(105)));
    assert!(!Value::Int(105).matches(&Value::Int(10)));
    assert!(!Value::Int(105).matches(&v_txt("105")));
    assert!(Value::Int(105).matches(&Value::Float(105.0)));
    assert!(!Value::Int(105).matches(&Value::Float(105.5)));
}

#[test]
fn float_matches_by_exact_equality() {
    assert!(Value::Float(1.5).matches(&Value::Float(1.5)));
    assert!(!Value::Float(1.5).matches(&Value::Float(1.500_000_000_1)));
    assert!(Value::Float(3.0).matches(&Value::Int(3)));
    assert!(!Value::Float(3.25).matches(&Value::Int(3)));
    assert!(!Value::Float(f64::NAN).matches(&Value::Float(f64::NAN)));
}

#[test]
fn float_ignores_integers_beyond_exact_range() {
    let big = (1i64 << 53) + 1;

    #[allow(clippy::cast_precision_loss)]
    let rounded = big as f64;

    assert!(!Value::Float(rounded).matches(&Value::Int(big)));
    assert!(!Value::Int(big).matches(&Value::Float(rounded)));
}

// ---- collections -------------------------------------------------------

#[test]
fn list_matches_when_any_member_matches() {
    let tags = Value::text_list(["Puerto Rico", "Idaho", "Oklahoma"]);

    assert!(tags.matches(&v_txt("Puerto Rico")));
    assert!(tags.matches(&v_txt("idaho")));
    assert!(tags.matches(&v_txt("homa")));
    assert!(!tags.matches(&v_txt("Texas")));
    assert!(!tags.matches(&v_txt("")));
}

#[test]
fn set_uses_list_rules() {
    let domains = Value::set_from(vec![v_txt("kage.com"), v_txt("zentix.com")]);

    assert!(domains.matches(&v_txt("ZENTIX")));
    assert!(!domains.matches(&v_txt("example")));
}

#[test]
fn empty_list_never_matches() {
    assert!(!Value::List(Vec::new()).matches(&v_txt("x")));
    assert!(!Value::List(Vec::new()).matches(&Value::Null));
}

// ---- null / opaque -----------------------------------------------------

#[test]
fn null_matches_blank_search_values() {
    assert!(Value::Null.matches(&Value::Null));
    assert!(Value::Null.matches(&v_txt("")));
    assert!(!Value::Null.matches(&v_txt("x")));
    assert!(!Value::Null.matches(&Value::Int(0)));
    assert!(!Value::Null.matches(&Value::Bool(false)));
}

#[test]
fn opaque_never_matches() {
    let opaque = Value::from_json(&json!({ "nested": true }));

    assert!(matches!(opaque, Value::Opaque(_)));
    assert!(!opaque.matches(&v_txt("nested")));
    assert!(!opaque.matches(&Value::Null));
}

// ---- decoding / display ------------------------------------------------

#[test]
fn from_json_keeps_integers_integral() {
    assert_eq!(Value::from_json(&json!(105)), Value::Int(105));
    assert_eq!(Value::from_json(&json!(-3)), Value::Int(-3));
    assert_eq!(Value::from_json(&json!(1.25)), Value::Float(1.25));
    assert_eq!(
        Value::from_json(&json!(u64::MAX)),
        Value::Float(18_446_744_073_709_551_615.0)
    );
    assert_eq!(
        Value::from_json(&json!(["a", 1, null])),
        Value::List(vec![v_txt("a"), Value::Int(1), Value::Null])
    );
}

#[test]
fn display_renders_literal_forms() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::Bool(false).to_string(), "false");
    assert_eq!(Value::Int(105).to_string(), "105");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(
        Value::text_list(["Jordan", "Roy"]).to_string(),
        "['Jordan', 'Roy']"
    );
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::Null]).to_string(),
        "[1, null]"
    );
    assert_eq!(Value::List(Vec::new()).to_string(), "[]");
}

#[test]
fn set_from_drops_repeats_in_first_seen_order() {
    let set = Value::set_from(vec![v_txt("b"), v_txt("a"), v_txt("b")]);

    assert_eq!(set, Value::Set(vec![v_txt("b"), v_txt("a")]));
}

// ---- properties --------------------------------------------------------

proptest! {
    #[test]
    fn prop_text_matches_its_own_substrings(s in "[a-zA-Z ]{1,24}", start in 0usize..24, len in 1usize..24) {
        let start = start.min(s.len() - 1);
        let end = (start + len).min(s.len());
        let needle = &s[start..end];

        prop_assert!(v_txt(&s).matches(&v_txt(&needle.to_uppercase())));
        prop_assert!(v_txt(&s).matches(&v_txt(&needle.to_lowercase())));
    }

    #[test]
    fn prop_empty_search_never_matches_any_text(s in ".{0,32}") {
        prop_assert!(!v_txt(&s).matches(&v_txt("")));
    }

    #[test]
    fn prop_list_matches_iff_some_member_matches(
        items in proptest::collection::vec("[a-z]{0,6}", 0..6),
        needle in "[a-z]{0,3}",
    ) {
        let list = Value::text_list(items.iter().map(String::as_str));
        let search = v_txt(&needle);
        let expected = items.iter().any(|item| v_txt(item).matches(&search));

        prop_assert_eq!(list.matches(&search), expected);
    }

    #[test]
    fn prop_int_equality_is_exact(a in any::<i64>(), b in any::<i64>()) {
        prop_assert_eq!(Value::Int(a).matches(&Value::Int(b)), a == b);
    }
}
