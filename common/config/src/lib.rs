//! Configuration types consumed by the orchestrator core.
//!
//! Loading these from disk, environment, or a settings UI is out of scope;
//! this crate only defines the shape and its defaults.

mod error;
mod settings;

pub use error::ConfigError;
pub use error::Result;
pub use settings::AgentLimitsConfig;
pub use settings::DetectionConfig;
pub use settings::ModelConfig;
pub use settings::OrchestratorConfig;
pub use settings::ReasoningEffort;
pub use settings::ToolDispatchConfig;
