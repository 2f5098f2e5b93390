use super::*;

#[test]
fn safe_is_default() {
    assert_eq!(ConcurrencySafety::default(), ConcurrencySafety::Safe);
    assert!(ConcurrencySafety::Safe.is_safe());
    assert!(!ConcurrencySafety::Unsafe.is_safe());
}

#[test]
fn validation_result_helpers() {
    assert!(ValidationResult::valid().is_valid());
    let invalid = ValidationResult::error("bad path");
    assert!(!invalid.is_valid());
}

#[test]
fn validation_error_display_includes_path() {
    let error = ValidationError::with_path("must not be empty", "file_path");
    assert_eq!(error.to_string(), "file_path: must not be empty");
}
