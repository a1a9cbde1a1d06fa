use super::{mutate, mutate_in_place, update};
use crate::get::{get, get_matches};
use crate::options::{GetOptions, MissingPolicy, MutateOptions, UpdateOptions};
use dotpath_core::{BoxError, Object, PathError, Value};
use serde_json::json;
use std::convert::Infallible;

fn read(root: &Value, path: &str) -> Option<Value> {
    get(root, path, &GetOptions::default()).expect("get must succeed")
}

fn read_all(root: &Value, path: &str) -> Vec<(String, Value)> {
    let options = GetOptions {
        default: MissingPolicy::Ignore,
        ..GetOptions::default()
    };
    get_matches(root, path, &options)
        .expect("get must succeed")
        .into_iter()
        .collect()
}

fn with_default(value: impl Into<Value>) -> MutateOptions {
    MutateOptions {
        default: MissingPolicy::Default(value.into()),
        ..MutateOptions::default()
    }
}

fn regex(default: MissingPolicy) -> MutateOptions {
    MutateOptions {
        default,
        regex: true,
    }
}

fn times(factor: i64) -> impl FnMut(Value) -> Result<Value, Infallible> {
    move |value| Ok(Value::from(value.as_i64().unwrap_or_default() * factor))
}

fn plus(offset: i64) -> impl FnMut(Value) -> Result<Value, Infallible> {
    move |value| Ok(Value::from(value.as_i64().unwrap_or_default() + offset))
}

fn or_else(fallback: i64) -> impl FnMut(Value) -> Result<Value, Infallible> {
    move |value| {
        Ok(if value.is_null() {
            Value::from(fallback)
        } else {
            value
        })
    }
}

/// `{"b": B}` where `B` holds `c = {"d": 1, "e": 2, "q": [1]}`.
fn object_root() -> Value {
    let object = Object::new("B").with_field("c", Value::from(json!({"d": 1, "e": 2, "q": [1]})));
    let mut root = Value::map();
    root.as_map_mut()
        .expect("root is a mapping")
        .insert("b".to_string(), object.into());
    root
}

#[test]
fn mutate_existing_and_missing_leaves() {
    let mut root = object_root();

    mutate(&mut root, "b.c.f", plus(3), &MutateOptions::default()).expect("ignored");
    assert_eq!(read(&root, "b.c.f"), Some(Value::Null));

    mutate(&mut root, "b.c.d", times(5), &MutateOptions::default()).expect("mutate");
    assert_eq!(read(&root, "b.c.d"), Some(Value::from(5)));
    mutate(&mut root, "b.c.e", plus(10), &MutateOptions::default()).expect("mutate");
    assert_eq!(read(&root, "b.c.e"), Some(Value::from(12)));

    mutate(&mut root, "b.c.f", or_else(99), &with_default(Value::Null)).expect("mutate");
    assert_eq!(read(&root, "b.c.f"), Some(Value::from(99)));

    mutate(&mut root, "b.c.nonexistent", plus(50), &with_default(10)).expect("mutate");
    assert_eq!(read(&root, "b.c.nonexistent"), Some(Value::from(60)));
}

#[test]
fn missing_leaf_under_ignore_stays_absent() {
    let mut root = Value::from(json!({"x": 1}));
    mutate(&mut root, "a.b", times(5), &MutateOptions::default()).expect("ignored");
    assert_eq!(root, Value::from(json!({"x": 1})));
}

#[test]
fn write_back_creates_missing_intermediates() {
    let mut root = Value::from(json!({"o": {}}));
    mutate(&mut root, "o.p.q", or_else(7), &with_default(Value::Null)).expect("mutate");
    assert_eq!(root, Value::from(json!({"o": {"p": {"q": 7}}})));
}

#[test]
fn write_back_replaces_whole_values() {
    let mut root = Value::from(json!({"o": {"n": [0, 1, 2, 3, 4, 5]}}));
    mutate(
        &mut root,
        "o.n",
        |value: Value| -> Result<Value, Infallible> {
            let shifted = value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .map(|item| Value::from(item.as_i64().unwrap_or_default() + 3))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            Ok(Value::from(shifted))
        },
        &MutateOptions::default(),
    )
    .expect("mutate");
    assert_eq!(read(&root, "o.n"), Some(Value::from(json!([3, 4, 5, 6, 7, 8]))));
}

#[test]
fn in_place_transform_edits_the_stored_value() {
    let mut root = Value::from(json!({"o": {"n": [0, 1, 2]}}));
    mutate_in_place(
        &mut root,
        "o",
        |value: &mut Value| -> Result<(), Infallible> {
            if let Some(map) = value.as_map_mut() {
                let bumped = map
                    .remove("n")
                    .and_then(|n| n.as_array().cloned())
                    .unwrap_or_default()
                    .into_iter()
                    .map(|item| Value::from(item.as_i64().unwrap_or_default() + 1))
                    .collect::<Vec<_>>();
                map.insert("p".to_string(), Value::from(bumped));
            }
            Ok(())
        },
        &MutateOptions::default(),
    )
    .expect("mutate");
    assert_eq!(root, Value::from(json!({"o": {"p": [1, 2, 3]}})));
}

#[test]
fn in_place_default_is_scratch_only() {
    let mut root = object_root();
    let push = |value: &mut Value| -> Result<(), Infallible> {
        if let Some(items) = value.as_array_mut() {
            items.push(Value::from(30));
        }
        Ok(())
    };

    mutate_in_place(&mut root, "b.c.q", push, &with_default(json!([]))).expect("mutate");
    assert_eq!(read(&root, "b.c.q"), Some(Value::from(json!([1, 30]))));

    let mut calls = 0;
    mutate_in_place(
        &mut root,
        "b.c.absent",
        |value: &mut Value| -> Result<(), Infallible> {
            calls += 1;
            *value = Value::from("scratch");
            Ok(())
        },
        &with_default(Value::Null),
    )
    .expect("mutate");
    assert_eq!(calls, 1);
    assert_eq!(read(&root, "b.c.absent"), Some(Value::Null));
}

#[test]
fn transform_errors_are_wrapped_with_the_path() {
    let mut root = Value::from(json!({"a": {"b": 1}}));
    let error = mutate(
        &mut root,
        "a.b",
        |_value: Value| -> Result<Value, BoxError> { Err("boom".into()) },
        &MutateOptions::default(),
    )
    .expect_err("transform fails");
    match error {
        PathError::TransformFailure { path, source } => {
            assert_eq!(path, "a.b");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(root, Value::from(json!({"a": {"b": 1}})));
}

#[test]
fn null_root_is_rejected() {
    let mut root = Value::Null;
    let error = mutate(&mut root, "a", times(2), &MutateOptions::default()).expect_err("null");
    assert!(matches!(error, PathError::NullRoot));
    let error = mutate_in_place(
        &mut root,
        "a",
        |_: &mut Value| -> Result<(), Infallible> { Ok(()) },
        &MutateOptions::default(),
    )
    .expect_err("null");
    assert!(matches!(error, PathError::NullRoot));
}

#[test]
fn regex_mutate_fans_out_over_object_fields() {
    let object = Object::new("B")
        .with_field("c", Value::from(json!({"d": 1, "e": 2})))
        .with_field("f", Value::from(json!({"g": 10, "h": 20, "o": [20]})));
    let mut root = Value::map();
    root.as_map_mut()
        .expect("root is a mapping")
        .insert("b".to_string(), object.into());

    mutate(&mut root, "b.{.*}.d", plus(5), &regex(MissingPolicy::Ignore)).expect("mutate");
    assert_eq!(read_all(&root, "b.{.*}.d"), vec![("b.c.d".to_string(), Value::from(6))]);

    mutate(&mut root, "b.{.*}.g", times(2), &regex(MissingPolicy::Ignore)).expect("mutate");
    mutate(&mut root, "b.{.*}.g", times(2), &regex(Value::from(5).into())).expect("mutate");
    assert_eq!(
        read_all(&root, "b.{.*}.g"),
        vec![
            ("b.c.g".to_string(), Value::from(10)),
            ("b.f.g".to_string(), Value::from(40)),
        ]
    );

    mutate_in_place(
        &mut root,
        "b.{.*}.o",
        |value: &mut Value| -> Result<(), Infallible> {
            if let Some(items) = value.as_array_mut() {
                items.push(Value::from(99));
            }
            Ok(())
        },
        &regex(MissingPolicy::Ignore),
    )
    .expect("mutate");
    assert_eq!(
        read_all(&root, "b.{.*}.o"),
        vec![("b.f.o".to_string(), Value::from(json!([20, 99])))]
    );

    mutate(&mut root, "b.{.*}.nomatch", or_else(0), &regex(Value::Null.into())).expect("mutate");
    assert_eq!(
        read_all(&root, "b.{.*}.nomatch"),
        vec![
            ("b.c.nomatch".to_string(), Value::from(0)),
            ("b.f.nomatch".to_string(), Value::from(0)),
        ]
    );

    mutate(&mut root, "b.{.*}.skipped", or_else(0), &regex(MissingPolicy::Ignore)).expect("mutate");
    assert!(read_all(&root, "b.{.*}.skipped").is_empty());
}

#[test]
fn regex_mutate_with_alternation_leaves_siblings() {
    let mut root = Value::from(json!({"nested": {"key": 5, "other": 10, "keep": 1}}));
    mutate(&mut root, "nested.{key|other}", times(2), &regex(MissingPolicy::Ignore))
        .expect("mutate");
    assert_eq!(
        root,
        Value::from(json!({"nested": {"key": 10, "other": 20, "keep": 1}}))
    );
}

#[test]
fn regex_mutate_writes_back_to_dotted_keys() {
    let mut root = Value::from(json!({"b": {"c.special": {"d": 1}, "e": {"d": 2}}}));
    mutate(&mut root, "b.{.*}.d", times(10), &regex(MissingPolicy::Ignore)).expect("mutate");
    assert_eq!(
        root,
        Value::from(json!({"b": {"c.special": {"d": 10}, "e": {"d": 20}}}))
    );
}

#[test]
fn update_merges_mappings() {
    let mut root = Value::from(json!({"b": {"c": {"d": 1, "e": 2}}}));
    update(&mut root, "b.c", &Value::from(json!({"e": 20, "f": 30})), &UpdateOptions::default())
        .expect("update");
    assert_eq!(read(&root, "b.c"), Some(Value::from(json!({"d": 1, "e": 20, "f": 30}))));

    let mut root = Value::from(json!({"b": {"c": {}}}));
    update(&mut root, "b.c", &Value::from(json!({"new_key": 100})), &UpdateOptions::default())
        .expect("update");
    assert_eq!(read(&root, "b.c.new_key"), Some(Value::from(100)));
}

#[test]
fn update_merges_object_field_dictionaries() {
    let object = Object::new("B").with_field("d", 1).with_field("e", 2);
    let mut root = Value::map();
    root.as_map_mut()
        .expect("root is a mapping")
        .insert("b".to_string(), object.into());

    update(&mut root, "b", &Value::from(json!({"e": 20, "f": 30})), &UpdateOptions::default())
        .expect("update");
    let fields = root
        .as_map()
        .and_then(|map| map.get("b"))
        .and_then(Value::as_object)
        .and_then(|object| object.field_dict())
        .cloned()
        .map(Value::from);
    assert_eq!(fields, Some(Value::from(json!({"d": 1, "e": 20, "f": 30}))));
}

#[test]
fn update_rejects_unmergeable_targets() {
    let patch = Value::from(json!({"e": 20}));

    let mut root = Value::from(json!({"b": {"c": 1}}));
    for (path, options) in [
        ("b.c", UpdateOptions::default()),
        ("d.c", UpdateOptions::default()),
        ("{.*}.c", UpdateOptions { regex: true }),
    ] {
        let error = update(&mut root, path, &patch, &options).expect_err("not mergeable");
        assert!(matches!(error, PathError::TypeMismatch { .. }), "{path}: {error}");
    }

    let mut root = Value::map();
    root.as_map_mut()
        .expect("root is a mapping")
        .insert("b".to_string(), Object::with_slots("NoDict", ["attr"]).into());
    let error = update(&mut root, "b", &patch, &UpdateOptions::default()).expect_err("slots");
    assert!(matches!(error, PathError::TypeMismatch { ref found, .. } if found.contains("NoDict")));

    let mut root = Value::from(json!({"b": {"c": {"d": 1}}}));
    let patch = Value::from(json!({"new_key": 100}));
    let error = update(&mut root, "b.nonexistent", &patch, &UpdateOptions::default())
        .expect_err("missing target");
    assert!(matches!(error, PathError::TypeMismatch { .. }));
    assert_eq!(root, Value::from(json!({"b": {"c": {"d": 1}}})));
}

#[test]
fn update_checks_the_patch_first() {
    let mut root = Value::Null;
    let error = update(&mut root, "b.c", &Value::from("not a dict"), &UpdateOptions::default())
        .expect_err("bad patch");
    assert!(matches!(error, PathError::InvalidPatch { .. }));

    let error = update(&mut root, "b.c", &Value::map(), &UpdateOptions::default())
        .expect_err("null root");
    assert!(matches!(error, PathError::NullRoot));
}

#[test]
fn regex_update_merges_every_match_and_skips_misses() {
    let options = UpdateOptions { regex: true };

    let mut root = Value::from(json!({"b": {"c": {"d": 1}, "e": {"d": 2}}}));
    update(&mut root, "b.{.*}", &Value::from(json!({"d": 10})), &options).expect("update");
    update(&mut root, "b.{.*}", &Value::from(json!({"h": 3.0})), &options).expect("update");
    assert_eq!(
        root,
        Value::from(json!({"b": {"c": {"d": 10, "h": 3.0}, "e": {"d": 10, "h": 3.0}}}))
    );

    let mut root = Value::from(json!({"b": {"c": {"d": 1}}}));
    let before = root.clone();
    update(&mut root, "b.{.*}.z", &Value::from(json!({"new_attr": 50})), &options).expect("skip");
    update(&mut root, "b.{x.*}", &Value::from(json!({"new_key": 100})), &options).expect("skip");
    assert_eq!(root, before);

    let error = update(&mut root, "b.{[}.d", &Value::from(json!({"k": 1})), &options)
        .expect_err("bad regex");
    assert!(matches!(error, PathError::InvalidPattern { .. }));
}

#[test]
fn regex_mutate_targets_brace_named_keys() {
    let mut root = Value::from(json!({"{x}": 1}));
    mutate(&mut root, "{.*}", times(5), &regex(MissingPolicy::Ignore)).expect("mutate");
    assert_eq!(root, Value::from(json!({"{x}": 5})));

    let mut root = Value::from(json!({"{x}": 1, "x": 2}));
    mutate(&mut root, r"{\{.*}", times(5), &regex(Value::Null.into())).expect("mutate");
    assert_eq!(root, Value::from(json!({"{x}": 5, "x": 2})));
}

#[test]
fn malformed_pattern_mutates_nothing() {
    let original = Value::from(json!({"b": {"c": {"d": 1}}}));
    let mut root = original.clone();

    let error = mutate(&mut root, "b.{.*}.{[}", times(5), &regex(MissingPolicy::Ignore))
        .expect_err("bad regex");
    assert!(matches!(error, PathError::InvalidPattern { .. }));
    let error = mutate_in_place(
        &mut root,
        "b.{(}.d",
        |value: &mut Value| -> Result<(), Infallible> {
            *value = Value::Null;
            Ok(())
        },
        &regex(Value::Null.into()),
    )
    .expect_err("bad regex");
    assert!(matches!(error, PathError::InvalidPattern { .. }));
    assert_eq!(root, original);
}
