use cellcheck_core::errors::{
    AssertionError, CompareError, DereferenceError, ExError, ExErrorKind, RegistryError,
};
use cellcheck_core::registry::{VariantRegistry, VariantSpec};
use cellcheck_core::ComparisonId;

#[test]
fn test_circular_structure_verifiable_by_kind() {
    let err = CompareError::CircularStructure {
        path: "$.foo".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::CircularStructure);
    assert_eq!(ex_err.code(), "ERR_CIRCULAR_STRUCTURE");
    assert_eq!(ex_err.path(), Some("$.foo"));
    assert_eq!(ex_err.message(), "Cannot compare circular structures");
}

#[test]
fn test_dereference_keeps_variant() {
    let err = CompareError::from(DereferenceError::new("observable", "disposed").with_label("count"));

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Dereference);
    assert_eq!(ex_err.code(), "ERR_DEREFERENCE");
    assert_eq!(ex_err.variant(), Some("observable"));
    assert!(ex_err.message().contains("disposed"));
}

#[test]
fn test_duplicate_variant_from_registry() {
    let mut registry = VariantRegistry::default();
    let err = registry.register(VariantSpec::new("computed")).unwrap_err();
    assert_eq!(
        err,
        RegistryError::DuplicateVariant {
            tag: "computed".to_string()
        }
    );

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateVariant);
    assert_eq!(ex_err.op(), Some("register_variant"));
    assert_eq!(ex_err.variant(), Some("computed"));
}

#[test]
fn test_empty_tag_is_invalid_input() {
    let err = VariantRegistry::empty()
        .with_variant(VariantSpec::new(""))
        .unwrap_err();

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
}

#[test]
fn test_assertion_failure_kind() {
    let err = AssertionError::Failed {
        message: "expected 42 to be computed".to_string(),
    };

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::AssertionFailed);
    assert_eq!(ex_err.message(), "expected 42 to be computed");
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::CircularStructure, "ERR_CIRCULAR_STRUCTURE"),
        (ExErrorKind::Dereference, "ERR_DEREFERENCE"),
        (ExErrorKind::DuplicateVariant, "ERR_DUPLICATE_VARIANT"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::AssertionFailed, "ERR_ASSERTION_FAILED"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_ex_error_builder_context() {
    let id = ComparisonId::from_string("cmp-1".to_string());
    let err = ExError::new(ExErrorKind::InvalidInput)
        .with_op("register_variant")
        .with_comparison_id(id.clone())
        .with_message("Variant tag cannot be empty");

    assert_eq!(err.comparison_id(), Some(&id));
    assert_eq!(
        err.to_string(),
        "[ERR_INVALID_INPUT] in operation 'register_variant': Variant tag cannot be empty (comparison: cmp-1)"
    );
}
