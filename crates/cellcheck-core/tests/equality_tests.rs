mod common;

use common::{fresh_computed_chain, nested_computed, self_referential, Signal};
use cellcheck_core::diff::{DiffEntry, DiffKey, MismatchKind};
use cellcheck_core::errors::{CompareError, DereferenceError};
use cellcheck_core::model::{computed, observable, try_computed, Observable, Value};
use cellcheck_core::registry::{VariantRegistry, VariantSpec};
use cellcheck_core::{equals, Comparator};

fn is_equal(a: &Value, b: &Value) -> bool {
    equals(a, b).unwrap().is_equal()
}

// ===== TRANSPARENCY =====

#[test]
fn test_wrapped_equals_wrapped() {
    assert!(is_equal(&observable(42), &observable(42)));
    assert!(is_equal(&computed(|| 42), &computed(|| 42)));
}

#[test]
fn test_wrapping_is_transparent_on_either_side() {
    assert!(is_equal(&observable(42), &Value::from(42)));
    assert!(is_equal(&Value::from(42), &observable(42)));
    assert!(is_equal(&computed(|| "x"), &Value::str("x")));
}

#[test]
fn test_nested_variants_compare_by_content() {
    let a = observable(computed(|| 42));
    let b = computed(|| observable(42));
    assert!(is_equal(&a, &b));
    assert!(is_equal(&nested_computed(42), &nested_computed(42)));
}

#[test]
fn test_deep_fresh_chains_unwrap_fully() {
    for depth in 1..=8 {
        assert!(
            is_equal(&fresh_computed_chain(depth, 42), &Value::from(42)),
            "depth {} against bare value",
            depth
        );
        assert!(
            is_equal(&fresh_computed_chain(depth, 42), &fresh_computed_chain(depth, 42)),
            "depth {} against identical chain",
            depth
        );
        assert!(is_equal(&observable(fresh_computed_chain(depth, 42)), &fresh_computed_chain(depth + 1, 42)));
    }
}

#[test]
fn test_deep_fresh_chain_mismatch_keeps_every_frame() {
    let diff = equals(&fresh_computed_chain(5, 42), &fresh_computed_chain(5, 24))
        .unwrap()
        .into_diff()
        .unwrap();
    assert_eq!(diff.frames.len(), 5);
    assert_eq!(diff.mismatches()[0].path, "$");
}

#[test]
fn test_wide_mappings_in_different_order() {
    let forward = Value::map((0..5_000).map(|i| (format!("k{}", i), i)));
    let reverse = Value::map((0..5_000).rev().map(|i| (format!("k{}", i), i)));
    assert!(is_equal(&forward, &reverse));

    let changed = Value::map((0..5_000).map(|i| (format!("k{}", i), if i == 4_321 { -1 } else { i })));
    let diff = equals(&forward, &changed).unwrap().into_diff().unwrap();
    assert_eq!(diff.mismatches()[0].path, "$.k4321");
}

#[test]
fn test_labels_do_not_affect_equality() {
    let a = Value::from(Observable::with_id(42, "left"));
    let b = Value::from(Observable::with_id(42, "right"));
    assert!(is_equal(&a, &b));
}

#[test]
fn test_wrapped_composites() {
    let a = observable(Value::map([("foo", 42), ("bar", 23)]));
    let b = Value::map([("bar", observable(23)), ("foo", computed(|| 42))]);
    assert!(is_equal(&a, &b));
}

// ===== MISMATCHES =====

#[test]
fn test_asymmetric_wrapping_mismatch() {
    assert!(!is_equal(&observable(42), &Value::from(24)));
    assert!(!is_equal(&Value::from(42), &observable(24)));
}

#[test]
fn test_no_coercion_between_kinds() {
    assert!(!is_equal(&observable("42"), &Value::from(42)));
    assert!(!is_equal(&observable(Value::map([("foo", 42)])), &Value::from(42)));
    assert!(!is_equal(&Value::seq([1]), &Value::map([("0", 1)])));
}

#[test]
fn test_composite_key_mismatch() {
    let a = Value::map([("foo", observable(42))]);
    let b = Value::map([("bar", observable(42))]);
    let diff = equals(&a, &b).unwrap().into_diff().unwrap();

    assert!(matches!(
        diff.child(&DiffKey::Key("foo".into())),
        Some(DiffEntry::Extra { .. })
    ));
    assert!(matches!(
        diff.child(&DiffKey::Key("bar".into())),
        Some(DiffEntry::Missing { .. })
    ));
}

#[test]
fn test_mismatch_paths_reach_into_cells() {
    let a = observable(Value::map([("list", observable(Value::seq([1, 2, 3])))]));
    let b = Value::map([("list", Value::seq([1, 5]))]);
    let diff = equals(&a, &b).unwrap().into_diff().unwrap();

    let summary: Vec<(String, MismatchKind)> = diff
        .mismatches()
        .into_iter()
        .map(|m| (m.path, m.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("$.list[1]".to_string(), MismatchKind::Changed),
            ("$.list[2]".to_string(), MismatchKind::Extra),
        ]
    );
}

#[test]
fn test_symmetry_of_verdict() {
    let pairs = [
        (observable(1), Value::from(1)),
        (observable(Value::seq([1, 2])), Value::seq([1])),
        (Value::map([("a", 1)]), computed(|| Value::map([("a", 2)]))),
    ];
    for (a, b) in &pairs {
        assert_eq!(is_equal(a, b), is_equal(b, a));
    }
}

// ===== CYCLES =====

#[test]
fn test_circular_structures_fail_fast() {
    let err = equals(&self_referential(), &self_referential()).unwrap_err();
    assert_eq!(err.to_string(), "Cannot compare circular structures");
}

#[test]
fn test_circular_against_itself() {
    let x = self_referential();
    let err = equals(&x, &x).unwrap_err();
    assert!(matches!(err, CompareError::CircularStructure { .. }));
}

#[test]
fn test_cycle_state_does_not_leak_between_calls() {
    let shared = Value::seq([1, 2]);
    let a = Value::map([("x", shared.clone())]);
    for _ in 0..3 {
        assert!(is_equal(&a, &Value::map([("x", shared.clone())])));
    }
}

#[test]
fn test_acyclic_self_comparison_is_equal() {
    let v = observable(Value::map([("a", Value::seq([1, 2]))]));
    assert!(is_equal(&v, &v));
}

// ===== DEREFERENCE FAILURES =====

#[test]
fn test_dereference_error_reaches_caller_unchanged() {
    let failing = try_computed(|| Err(DereferenceError::new("computed", "disposed").with_label("total")));
    let err = equals(&failing, &Value::from(1)).unwrap_err();
    assert_eq!(
        err,
        CompareError::Dereference(DereferenceError::new("computed", "disposed").with_label("total"))
    );
}

// ===== REGISTRY =====

#[test]
fn test_unregistered_cells_are_opaque() {
    let signal = Value::from(Signal::new(42));
    assert!(!is_equal(&signal, &Value::from(42)));
    assert!(is_equal(&signal, &signal.clone()));
}

#[test]
fn test_custom_variant_is_unwrapped() {
    let registry = VariantRegistry::default()
        .with_variant(VariantSpec::new("signal"))
        .unwrap();
    let comparator = Comparator::new(&registry);

    let signal = Signal::new(42);
    let outcome = comparator
        .equals(&Value::from(signal.clone()), &observable(42))
        .unwrap();
    assert!(outcome.is_equal());
    assert_eq!(signal.reads.get(), 1);
}

#[test]
fn test_custom_predicate_matches_by_label() {
    let registry = VariantRegistry::empty()
        .with_variant(
            VariantSpec::new("labelled")
                .with_predicate(|cell| cell.label().is_some())
                .with_display_prefix("ref"),
        )
        .unwrap();
    let comparator = Comparator::new(&registry);

    let labelled = Value::from(Observable::with_id(1, "one"));
    assert!(comparator.equals(&labelled, &Value::from(1)).unwrap().is_equal());
    // Not recognised without a label, so compared by identity
    assert!(!comparator.equals(&observable(1), &Value::from(1)).unwrap().is_equal());
}

// ===== PROPERTIES =====

#[test]
fn test_have_properties_through_cells() {
    let registry = VariantRegistry::default();
    let comparator = Comparator::new(&registry);
    let subject = observable(Value::map([
        ("foo", observable(42)),
        ("bar", observable(42)),
        ("baz", Value::from(42)),
    ]));

    let props = Value::map([("foo", observable(42)), ("baz", Value::from(42))]);
    assert!(comparator.compare_properties(&subject, &props).unwrap().is_equal());

    let props = Value::map([("foo", Value::from(1))]);
    let diff = comparator
        .compare_properties(&subject, &props)
        .unwrap()
        .into_diff()
        .unwrap();
    assert_eq!(diff.mismatches().len(), 1);
    assert_eq!(diff.mismatches()[0].path, "$.foo");
}
