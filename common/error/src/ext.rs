//! Extension trait implemented by every per-crate error enum so callers can
//! classify an error without matching on its concrete variants.

use crate::status_code::StatusCode;

/// Common classification surface for crate-level error types.
pub trait ErrorExt: std::error::Error {
    /// The status code this error maps to.
    fn status_code(&self) -> StatusCode;

    /// Whether the underlying cause is safe to retry.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
