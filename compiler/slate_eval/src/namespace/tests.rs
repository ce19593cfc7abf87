#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn register_rejects_illegal_names() {
    let mut ns = Namespace::new();
    for bad in ["", "1bad", "_x", "a-b", "a b", "$a"] {
        assert_eq!(
            ns.register(bad, Value::Number(1.0)),
            Err(NameError::Illegal(bad.to_string())),
            "{bad:?} should be illegal"
        );
    }
    assert!(ns.is_empty());
}

#[test]
fn register_rejects_duplicates_without_mutation() {
    let mut ns = Namespace::new();
    ns.register("ok_1", Value::Number(3.0)).unwrap();
    assert_eq!(
        ns.register("ok_1", Value::Number(4.0)),
        Err(NameError::Duplicate("ok_1".to_string()))
    );
    assert_eq!(ns.lookup("ok_1"), Some(&Value::Number(3.0)));
    assert_eq!(ns.len(), 1);
}

#[test]
fn upsert_reports_overwrite_and_allows_type_change() {
    let mut ns = Namespace::new();
    assert_eq!(ns.upsert("x", Value::text("a")), Ok(Upsert::Created));
    assert_eq!(ns.upsert("x", Value::Number(5.0)), Ok(Upsert::Overwrote));
    assert_eq!(ns.lookup("x"), Some(&Value::Number(5.0)));
    assert_eq!(ns.len(), 1);
}

#[test]
fn upsert_still_checks_names() {
    let mut ns = Namespace::new();
    assert_eq!(
        ns.upsert("9lives", Value::Boolean(true)),
        Err(NameError::Illegal("9lives".to_string()))
    );
}

#[test]
fn lookup_of_missing_name_is_none() {
    let ns = Namespace::new();
    assert_eq!(ns.lookup("nope"), None);
    assert!(!ns.contains("nope"));
}

#[test]
fn dump_keeps_insertion_order() {
    let mut ns = Namespace::new();
    ns.register("name", Value::text("Alice")).unwrap();
    ns.register("age", Value::Number(20.0)).unwrap();
    ns.upsert("name", Value::text("Bob")).unwrap();
    ns.register("ok", Value::Boolean(false)).unwrap();
    assert_eq!(ns.dump(), "  name = \"Bob\"\n  age = 20\n  ok = False\n");
}

#[test]
fn name_error_codes() {
    assert_eq!(NameError::Illegal(String::new()).code(), ErrorCode::E2001);
    assert_eq!(NameError::Duplicate(String::new()).code(), ErrorCode::E2002);
}

proptest! {
    #[test]
    fn second_register_always_fails(
        name in "[A-Za-z][A-Za-z0-9_]{0,12}",
        a in any::<f64>(),
        b in any::<f64>(),
    ) {
        let mut ns = Namespace::new();
        prop_assert!(ns.register(&name, Value::Number(a)).is_ok());
        prop_assert!(ns.register(&name, Value::Number(b)).is_err());
        prop_assert_eq!(ns.len(), 1);
    }
}
