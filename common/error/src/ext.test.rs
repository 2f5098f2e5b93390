use super::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("boom")]
struct Boom;

impl ErrorExt for Boom {
    fn status_code(&self) -> StatusCode {
        StatusCode::TimeoutError
    }
}

#[test]
fn default_retryable_delegates_to_status_code() {
    assert!(Boom.is_retryable());
}
