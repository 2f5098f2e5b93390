//! Unified status codes for error classification across the orchestrator.
//!
//! Status code format: XX_YYY (5-digit)
//! - XX = Category (00-99)
//! - YYY = Code within category (000-999)

use strum::AsRefStr;
use strum::EnumIter;

/// Status code metadata.
#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub retryable: bool,
    pub log_error: bool,
    pub category: StatusCategory,
}

/// Status code category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// Success.
    Success,
    /// Common/internal errors.
    Common,
    /// Input/validation errors.
    Input,
    /// Permission/security errors.
    Permission,
    /// Resource/limit errors (timeouts, depth, plugin failures).
    Resource,
}

macro_rules! define_status_codes {
    ($(
        $(#[$attr:meta])*
        $name:ident = $value:expr => {
            retryable: $retry:expr,
            log_error: $log:expr,
            category: $cat:ident $(,)?
        }
    ),* $(,)?) => {
        /// Status codes for error classification.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
        #[repr(i32)]
        pub enum StatusCode {
            $($(#[$attr])* $name = $value,)*
        }

        impl StatusCode {
            /// Returns the metadata for this status code.
            pub const fn meta(&self) -> StatusMeta {
                match self {
                    $(Self::$name => StatusMeta {
                        retryable: $retry,
                        log_error: $log,
                        category: StatusCategory::$cat,
                    },)*
                }
            }
        }
    };
}

define_status_codes! {
    Success = 00_000 => { retryable: false, log_error: false, category: Success },

    Unknown = 01_000 => { retryable: false, log_error: true, category: Common },
    Internal = 01_001 => { retryable: true, log_error: true, category: Common },
    Cancelled = 01_002 => { retryable: false, log_error: false, category: Common },
    Interrupted = 01_003 => { retryable: false, log_error: false, category: Common },

    ValidationError = 02_000 => { retryable: false, log_error: false, category: Input },
    UserError = 02_001 => { retryable: false, log_error: false, category: Input },
    FileError = 02_002 => { retryable: false, log_error: false, category: Input },
    InteractiveCommand = 02_003 => { retryable: false, log_error: false, category: Input },
    CommandFailed = 02_004 => { retryable: false, log_error: false, category: Input },

    PermissionError = 03_000 => { retryable: false, log_error: false, category: Permission },
    SecurityError = 03_001 => { retryable: false, log_error: true, category: Permission },

    ExecutionError = 04_000 => { retryable: false, log_error: true, category: Resource },
    PluginError = 04_001 => { retryable: true, log_error: true, category: Resource },
    TimeoutError = 04_002 => { retryable: true, log_error: false, category: Resource },
    DepthLimitExceeded = 04_003 => { retryable: false, log_error: false, category: Resource },
}

impl StatusCode {
    /// Returns true if the error is retryable.
    pub const fn is_retryable(&self) -> bool {
        self.meta().retryable
    }

    /// Returns true if the error should be logged.
    pub const fn should_log_error(&self) -> bool {
        self.meta().log_error
    }

    /// Returns the category of this status code.
    pub const fn category(&self) -> StatusCategory {
        self.meta().category
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
#[path = "status_code.test.rs"]
mod tests;
