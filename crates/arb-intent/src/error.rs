use arb_core::AgentHandle;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntentError {
    /// The intent's target agent has despawned (or its slot was reused).
    #[error("intent target {0} no longer exists")]
    InvalidTarget(AgentHandle),
}

pub type IntentResult<T> = Result<T, IntentError>;
