use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EconomyError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl EconomyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EconomyError::Validation(_) | EconomyError::InsufficientBalance => {
                StatusCode::BAD_REQUEST
            }
            EconomyError::NotFound(_) => StatusCode::NOT_FOUND,
            EconomyError::Forbidden => StatusCode::FORBIDDEN,
            EconomyError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<diesel::result::Error> for EconomyError {
    fn from(err: diesel::result::Error) -> Self {
        EconomyError::Storage(err.into())
    }
}

impl From<diesel::r2d2::PoolError> for EconomyError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        EconomyError::Storage(err.into())
    }
}
