//! End-to-end behavior of the runtime type combinators.
//!
//! Covers the documented contracts of each component:
//! 1. Primitives and `typedef`
//! 2. Polymorphic constructors
//! 3. Struct checking
//! 4. Enum matching
//! 5. Typed function signatures

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::missing_panics_doc
)]

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{color, init_tracing, sample_struct, user, user_struct};
use runtype_core::{
    any, boolean, defun, either, float, int, list_of, map_of, optional, string, structure,
    typedef, ErrorKind, Kind, Record, RenderConfig, Renderer, StructDef, TypeError, Value,
};

// ============================================================================
// PRIMITIVES
// ============================================================================

#[test]
fn primitive_returns_value_of_matching_kind() {
    init_tracing();
    assert_eq!(int().validate(Value::Int(7)).unwrap(), Value::Int(7));
    assert_eq!(boolean().validate(Value::Bool(true)).unwrap(), Value::Bool(true));
    assert_eq!(float().validate(Value::Float(0.5)).unwrap(), Value::Float(0.5));
    assert_eq!(string().validate(Value::from("s")).unwrap(), Value::from("s"));
    assert_eq!(any().validate(Value::Null).unwrap(), Value::Null);
}

#[test]
fn primitive_mismatch_message_names_type_value_and_kind() {
    let err = int().validate(Value::from("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
    assert_eq!(err.to_string(), "expected int, got \"x\" (string)");
}

#[test]
fn typedef_predicate_defines_membership() {
    let short = typedef("short", |v| v.as_str().is_some_and(|s| s.len() < 4));
    assert!(short.validate(Value::from("abc")).is_ok());
    let err = short.validate(Value::from("abcdef")).unwrap_err();
    assert!(matches!(err, TypeError::Mismatch { ref expected, .. } if expected == "short"));
}

// ============================================================================
// POLYMORPHIC CONSTRUCTORS
// ============================================================================

#[test]
fn list_of_int_is_identity_on_success() {
    let list = Value::from(vec![1, 2, 3]);
    assert_eq!(list_of(int()).validate(list.clone()).unwrap(), list);
}

#[test]
fn list_of_int_reports_offending_element() {
    let list = Value::from(vec![Value::Int(1), Value::from("x"), Value::Int(3)]);
    let err = list_of(int()).validate(list).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"x\""), "{message}");
    assert!(message.contains("int"), "{message}");
}

#[test]
fn optional_accepts_absent_marker() {
    assert_eq!(optional(int()).validate(Value::Null).unwrap(), Value::Null);
}

#[test]
fn map_of_reports_one_failure_when_several_values_fail() {
    let mut attrs = im::HashMap::new();
    attrs.insert("a".to_string(), Value::from("x"));
    attrs.insert("b".to_string(), Value::from("y"));
    attrs.insert("c".to_string(), Value::Int(1));
    let err = map_of(int()).validate(Value::Map(attrs)).unwrap_err();
    assert!(matches!(err, TypeError::Mismatch { kind: Kind::Str, .. }));
}

#[test]
fn either_reports_itself_when_both_branches_fail() {
    let err = either(int(), string()).validate(Value::Bool(true)).unwrap_err();
    assert_eq!(err.to_string(), "expected either<int,string>, got true (bool)");
}

// ============================================================================
// STRUCTS
// ============================================================================

#[test]
fn struct_with_optional_field_omitted_succeeds() {
    let value = Value::from(Record::new().with("a", 1));
    assert_eq!(sample_struct().validate(value.clone()).unwrap(), value);
}

#[test]
fn struct_rejects_extraneous_field() {
    let value = Value::from(Record::new().with("a", 1).with("c", 2));
    let err = sample_struct().validate(value).unwrap_err();
    assert_eq!(err.to_string(), "unexpected field 'c' in struct 'anonymous'");
}

#[test]
fn struct_requires_non_optional_field() {
    let value = Value::from(Record::new().with("b", "x"));
    let err = sample_struct().validate(value).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required field 'a' of type int in struct 'anonymous'"
    );
}

#[test]
fn struct_field_mismatch_names_field_and_kinds() {
    let value = Value::from(Record::new().with("a", 1.5));
    let err = sample_struct().validate(value).unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'a' of struct 'anonymous' is of type float, but expected int"
    );
}

#[test]
fn struct_rejects_non_record() {
    let err = user_struct().validate(Value::from("alice")).unwrap_err();
    assert!(err.is_struct_error());
    assert!(matches!(err, TypeError::NotStruct { ref structure, .. } if structure == "User"));
}

#[test]
fn struct_accepts_json_object() {
    let json = serde_json::json!({"id": 1, "name": "alice", "tags": ["admin"]});
    let value = Value::from(json);
    assert!(user_struct().validate(value).is_ok());
}

#[test]
fn nested_structs_propagate_inner_failures() {
    let team = StructDef::named("Team")
        .field("lead", user_struct())
        .field("members", list_of(user_struct()))
        .build();

    let good = Value::from(
        Record::new()
            .with("lead", user(1, "alice"))
            .with("members", vec![user(2, "bob")]),
    );
    assert!(team.validate(good).is_ok());

    let bad_member = Value::from(Record::new().with("id", 3).with("name", "carol"));
    let bad = Value::from(
        Record::new()
            .with("lead", user(1, "alice"))
            .with("members", vec![bad_member]),
    );
    let err = team.validate(bad).unwrap_err();
    assert!(
        matches!(err, TypeError::MissingField { ref structure, ref field, .. }
            if structure == "User" && field == "tags"),
        "{err}"
    );
}

#[test]
fn struct_uses_custom_renderer_for_offending_values() {
    let point = StructDef::named("Point")
        .field("x", int())
        .renderer(Renderer::new(|v| format!("<{}>", v.kind())))
        .build();
    let err = point.validate(Value::from(vec![1, 2])).unwrap_err();
    assert_eq!(err.to_string(), "<list> (list) is not a struct, expected struct 'Point'");
}

// ============================================================================
// ENUMS
// ============================================================================

#[test]
fn enum_match_returns_action_for_member() {
    let table: HashMap<&str, i32> = [("red", 1), ("green", 2), ("blue", 3)].into();
    assert_eq!(color().match_value(&Value::from("green"), &table), Ok(&2));
}

#[test]
fn enum_match_requires_every_member() {
    let table: HashMap<&str, i32> = [("red", 1), ("green", 2)].into();
    let err = color()
        .match_value(&Value::from("green"), &table)
        .unwrap_err();
    assert_eq!(
        err,
        TypeError::IncompleteMatch {
            enumeration: "Color".to_string(),
            missing: vec!["blue".to_string()],
        }
    );
    assert_eq!(
        err.to_string(),
        "match on enum 'Color' is missing cases: 'blue'"
    );
}

#[test]
fn enum_identity_rejects_non_member() {
    let err = color().validate(Value::from("purple")).unwrap_err();
    assert_eq!(err.to_string(), "'purple' is not a member of enum 'Color'");
}

#[test]
fn enum_type_composes_with_structs() {
    let pixel = structure(Some("Pixel"), [("color", color().ty()), ("x", int())]);
    let good = Value::from(Record::new().with("color", "red").with("x", 0));
    assert!(pixel.validate(good).is_ok());

    let bad = Value::from(Record::new().with("color", "pink").with("x", 0));
    assert_eq!(
        pixel.validate(bad).unwrap_err(),
        TypeError::FieldMismatch {
            structure: "Pixel".to_string(),
            field: "color".to_string(),
            kind: Kind::Str,
            expected: "Color".to_string(),
        }
    );
}

#[test]
fn enum_type_alone_reports_membership() {
    let err = color().ty().validate(Value::from("pink")).unwrap_err();
    assert_eq!(err.to_string(), "'pink' is not a member of enum 'Color'");
}

#[test]
fn struct_typed_field_holding_scalar_names_the_field() {
    let account = structure(Some("Account"), [("owner", user_struct())]);
    let err = account
        .validate(Value::from(Record::new().with("owner", 5)))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "field 'owner' of struct 'Account' is of type int, but expected User"
    );
}

// ============================================================================
// SIGNATURES
// ============================================================================

fn adder() -> runtype_core::Defun {
    defun([int(), int(), int()], |args| {
        Value::Int(args.iter().filter_map(Value::as_int).sum())
    })
    .unwrap()
}

#[test]
fn defun_applied_one_argument_at_a_time() {
    let partial = adder().apply(Value::Int(2)).unwrap().left().unwrap();
    let result = partial.apply(Value::Int(3)).unwrap().right().unwrap();
    assert_eq!(result, Value::Int(5));
}

#[test]
fn defun_rejects_bad_argument_before_running() {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let f = defun([int(), int(), int()], move |_| {
        flag.store(true, Ordering::SeqCst);
        Value::Int(0)
    })
    .unwrap();

    let partial = f.apply(Value::Int(2)).unwrap().left().unwrap();
    let err = partial.apply(Value::from("x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
    assert!(!ran.load(Ordering::SeqCst));

    let err = f.call(vec![Value::Int(2), Value::from("x")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Mismatch);
    assert!(!ran.load(Ordering::SeqCst));
}

#[test]
fn defun_signature_length_bounds() {
    assert!(defun([int(), int()], |args| args[0].clone()).is_ok());
    let err = defun([int()], |_| Value::Null).unwrap_err();
    assert_eq!(err.to_string(), "signature must have at least two types, got 1");
    assert!(matches!(
        defun(Vec::new(), |_| Value::Null),
        Err(TypeError::InvalidSignature { len: 0 })
    ));
}

#[test]
fn defun_displays_arrow_signature() {
    let f = defun([list_of(int()), optional(string()), boolean()], |_| {
        Value::Bool(true)
    })
    .unwrap();
    assert_eq!(f.to_string(), "λ :: list<int> -> option<string> -> bool");
}

#[test]
fn defun_call_reports_arity() {
    let err = adder().call(vec![Value::Int(1)]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "λ :: int -> int -> int expects 2 argument(s), got 1"
    );
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn render_config_from_toml_bounds_messages() {
    let config = RenderConfig::from_toml_str("max_len = 6\nmax_items = 2").unwrap();
    let ty = list_of(string()).with_renderer(Renderer::from_config(config));
    let err = ty.validate(Value::Int(1234567890)).unwrap_err();
    assert_eq!(err.to_string(), "expected list<string>, got 123456... (int)");
}
