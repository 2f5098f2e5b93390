//! Sub-agent pooling and delegation bookkeeping (C9, C11).

mod call_stack;
mod config;
mod delegation;
mod pool;

pub use call_stack::AgentCallStack;
pub use call_stack::DepthLimitError;
pub use config::AgentConfig;
pub use delegation::is_injectable_tool;
pub use delegation::DelegationContext;
pub use delegation::DelegationEntry;
pub use delegation::DelegationState;
pub use delegation::InterjectionRoute;
pub use pool::AgentPool;
pub use pool::PoolError;
pub use pool::PooledAgent;
