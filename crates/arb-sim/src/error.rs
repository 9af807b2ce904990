use arb_core::AgentHandle;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("decision configuration error: {0}")]
    Config(String),

    /// No configuration was supplied.  The builder recovers by using
    /// defaults; it never reaches the caller.
    #[error("no decision configuration supplied")]
    ConfigMissing,

    #[error("{0} is not a live agent")]
    AgentNotFound(AgentHandle),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("script parse error: {0}")]
    Parse(String),
}

pub type SimResult<T> = Result<T, SimError>;
