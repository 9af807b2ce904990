//! Framework error type.
//!
//! Sub-crates define their own error enums for the conditions their stages
//! name (`IntentError`, `PlanError`, …).  `ArbError` covers what is shared:
//! stale handles, bad configuration, and parse failures.

use thiserror::Error;

use crate::AgentHandle;

/// The top-level error type for `arb-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArbError {
    #[error("{0} not found")]
    AgentNotFound(AgentHandle),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `arb-*` crates.
pub type ArbResult<T> = Result<T, ArbError>;
