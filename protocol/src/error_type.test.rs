use super::*;

#[test]
fn display_uses_snake_case() {
    assert_eq!(ErrorType::DepthLimitExceeded.to_string(), "depth_limit_exceeded");
    assert_eq!(ErrorType::ValidationError.to_string(), "validation_error");
}

#[test]
fn timeout_maps_to_retryable_status() {
    assert!(ErrorType::TimeoutError.is_retryable());
    assert!(!ErrorType::ValidationError.is_retryable());
}

#[test]
fn serializes_as_snake_case_json() {
    let json = serde_json::to_string(&ErrorType::PermissionError).unwrap();
    assert_eq!(json, "\"permission_error\"");
}
