use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InterruptError {
    /// Buffer empty or every entry already processed.  Not a fault: the
    /// active intent is left untouched.
    #[error("no eligible interrupt")]
    NoEligibleInterrupt,
}

pub type InterruptResult<T> = Result<T, InterruptError>;
