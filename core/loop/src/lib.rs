//! The send/receive loop and model transport contract (C10).

mod engine;
mod model_client;

pub use engine::Engine;
pub use engine::InterruptReason;
pub use engine::ENGINE_INTERRUPTED_MESSAGE;
pub use engine::MAX_DURATION_EXCEEDED_MESSAGE;
pub use engine::USER_INTERRUPTED_REMINDER;
pub use relay_detection::LoopInfo;
pub use relay_detection::PatternMatcher;
pub use model_client::ModelClient;
pub use model_client::ModelRequestOptions;
pub use model_client::ModelResponse;
pub use model_client::ToolDefinition;
