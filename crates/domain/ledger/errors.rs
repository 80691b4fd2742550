use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Caller input the ledger refuses (non-positive payment, missing enrollment data).
    #[error("validation error: {0}")]
    Validation(String),
    /// Malformed date or out-of-range calendar arithmetic.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
