//! Black-box tests against the public `parse`/`parse_with_filename` surface.

use libyay::{parse, parse_with_filename, Value};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn obj(pairs: &[(&str, Value)]) -> Value {
    let mut m = HashMap::new();
    for (k, v) in pairs {
        m.insert(k.to_string(), v.clone());
    }
    Value::Object(m)
}

#[test]
fn null_document() {
    assert_eq!(parse("null").unwrap(), Value::Null);
}

#[test]
fn root_map_of_integers() {
    let v = parse("answer: 42\nerror: 404\n").unwrap();
    assert_eq!(
        v,
        obj(&[
            ("answer", Value::Integer(42.into())),
            ("error", Value::Integer(404.into())),
        ])
    );
}

#[test]
fn block_array_of_integers() {
    let v = parse("- 5\n- 3\n").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![Value::Integer(5.into()), Value::Integer(3.into())])
    );
}

#[test]
fn inline_object_with_single_quoted_strings() {
    let v = parse("{name: 'Marvin', mood: 'depressed'}").unwrap();
    assert_eq!(
        v,
        obj(&[
            ("name", Value::String("Marvin".to_string())),
            ("mood", Value::String("depressed".to_string())),
        ])
    );
}

#[test]
fn inline_bytes() {
    let v = parse("<b0b5c0ff>").unwrap();
    assert_eq!(v, Value::Bytes(vec![0xb0, 0xb5, 0xc0, 0xff]));

    let empty = parse("<>").unwrap();
    assert_eq!(empty, Value::Bytes(vec![]));
}

#[test]
fn double_quoted_string_with_unicode_escape() {
    let v = parse(r#""\u{1F600}""#).unwrap();
    assert_eq!(v, Value::String("\u{1F600}".to_string()));
}

#[test]
fn tab_is_rejected_at_line_and_column_one() {
    let err = parse("\tx: 1\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("Tab not allowed (use spaces)"));
}

#[test]
fn inline_array_missing_space_after_comma() {
    let err = parse_with_filename("[1,2]", None).unwrap_err();
    assert!(err.to_string().starts_with("Expected space after \",\""));
}

#[test]
fn block_string_strips_common_indent() {
    let v = parse("`\n  line1\n  line2\n").unwrap();
    assert_eq!(v, Value::String("\nline1\nline2\n".to_string()));
}

#[test]
fn block_bytes_in_property_context() {
    let v = parse("data: >\n  b0 b5\n  c0 ff\n").unwrap();
    assert_eq!(
        v,
        obj(&[("data", Value::Bytes(vec![0xb0, 0xb5, 0xc0, 0xff]))])
    );
}

#[test]
fn digit_grouping_spaces_are_ignored_in_floats() {
    let grouped = parse("6.283 185 307 179 586").unwrap();
    let plain = parse("6.283185307179586").unwrap();
    assert_eq!(grouped, plain);
}

#[test]
fn uppercase_hex_digit_is_rejected() {
    let err = parse("<CAFE>").unwrap_err();
    assert!(err.to_string().starts_with("Uppercase hex digit"));
}

// --- Universal invariants -------------------------------------------------

#[test]
fn parsing_is_deterministic() {
    let source = "a:\n  b: [1, 2, 3]\n  c: 'hello'\n";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn digit_grouping_spaces_are_ignored_in_integers() {
    assert_eq!(parse("1 2 3").unwrap(), parse("123").unwrap());
}

#[test]
fn concatenated_strings_join_with_no_separator() {
    let v = parse("message:\n  \"hello \"\n  \"world\"\n").unwrap();
    assert_eq!(v, obj(&[("message", Value::String("hello world".to_string()))]));
}

#[test]
fn nested_map_and_array_round_trip_structurally() {
    let source = "people:\n  - name: 'Alice'\n    age: 30\n  - name: 'Bob'\n    age: 25\n";
    let v = parse(source).unwrap();
    let people = v.as_object().unwrap().get("people").unwrap();
    let arr = people.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(
        arr[0].as_object().unwrap().get("name").unwrap().as_str(),
        Some("Alice")
    );
}

#[test]
fn duplicate_keys_last_write_wins() {
    let v = parse("a: 1\na: 2\n").unwrap();
    assert_eq!(v, obj(&[("a", Value::Integer(2.into()))]));
}

#[test]
fn empty_document_is_null() {
    assert_eq!(parse("").unwrap(), Value::Null);
}

#[test]
fn error_includes_filename_when_provided() {
    let err = parse_with_filename("<CAFE>", Some("doc.yay")).unwrap_err();
    assert!(err.to_string().contains("<doc.yay>"));
}

#[test]
fn error_omits_location_when_no_filename_given() {
    let err = parse("null\nextra").unwrap_err();
    assert!(!err.to_string().contains(" at "));
}

#[test]
fn plus_sign_on_numbers_is_rejected() {
    let err = parse("+1").unwrap_err();
    assert!(err.to_string().starts_with("Unexpected character"));
}

#[test]
fn multiple_top_level_values_are_rejected() {
    let err = parse("1\n2\n").unwrap_err();
    assert!(err.to_string().starts_with("Unexpected extra content"));
}

#[test]
fn nan_and_infinity_keywords() {
    assert!(parse("nan").unwrap().as_float().unwrap().is_nan());
    assert_eq!(parse("infinity").unwrap(), Value::Float(f64::INFINITY));
    assert_eq!(parse("-infinity").unwrap(), Value::Float(f64::NEG_INFINITY));
}

#[test]
fn inline_bullet_cascade_wraps_singletons() {
    let v = parse("- - - 'hello'\n").unwrap();
    assert_eq!(
        v,
        Value::Array(vec![Value::Array(vec![Value::Array(vec![Value::String(
            "hello".to_string()
        )])])])
    );
}
