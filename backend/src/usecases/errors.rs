use axum::http::StatusCode;
use gymdesk::domain::ledger::errors::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Validation(_) | UseCaseError::InvalidArgument(_) => {
                StatusCode::BAD_REQUEST
            }
            UseCaseError::Conflict(_) => StatusCode::CONFLICT,
            UseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LedgerError> for UseCaseError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(message) => UseCaseError::Validation(message),
            LedgerError::InvalidArgument(message) => UseCaseError::InvalidArgument(message),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(UseCaseError::NotFound("member").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            UseCaseError::Conflict("already checked in".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            UseCaseError::Internal(anyhow::anyhow!("db down")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn ledger_errors_become_bad_requests() {
        let validation: UseCaseError = LedgerError::Validation("amount".into()).into();
        let invalid: UseCaseError = LedgerError::InvalidArgument("date".into()).into();

        assert!(matches!(validation, UseCaseError::Validation(_)));
        assert!(matches!(invalid, UseCaseError::InvalidArgument(_)));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
