use super::*;

#[test]
fn retryable_matches_meta() {
    assert!(StatusCode::TimeoutError.is_retryable());
    assert!(!StatusCode::ValidationError.is_retryable());
}

#[test]
fn category_groups_permission_codes() {
    assert_eq!(StatusCode::PermissionError.category(), StatusCategory::Permission);
    assert_eq!(StatusCode::SecurityError.category(), StatusCategory::Permission);
}

#[test]
fn display_uses_variant_name() {
    assert_eq!(StatusCode::DepthLimitExceeded.to_string(), "DepthLimitExceeded");
}
