//! Errors - エラー型と分類
//!
//! 呼び出し元に見せるエラーは `LoanError` の 5 種類だけです。
//! store 固有の失敗は `StoreError` として包みます。

use thiserror::Error;

use super::ids::ApplicationId;

/// LoanError は呼び出し元に返すドメインエラー
#[derive(Debug, Error)]
pub enum LoanError {
    /// Malformed, missing or duplicate input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Credential mismatch. The message does not say which part was wrong.
    #[error("invalid credentials")]
    Unauthorized,

    #[error("loan application {0} not found")]
    NotFound(ApplicationId),

    #[error(transparent)]
    Store(StoreError),

    /// Failure inside the service itself (hashing, a panicked blocking task).
    #[error("internal error: {0}")]
    Internal(String),
}

/// StoreError は永続化レイヤーのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (email) is already taken.
    #[error("duplicate {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    /// The store could not be opened or reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store document is corrupt: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<StoreError> for LoanError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field, value } => {
                LoanError::Validation(format!("{field} {value} is already registered"))
            }
            other => LoanError::Store(other),
        }
    }
}

impl LoanError {
    /// Status code a request/response transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            LoanError::Validation(_) => 400,
            LoanError::Unauthorized => 401,
            LoanError::NotFound(_) => 404,
            LoanError::Store(_) | LoanError::Internal(_) => 500,
        }
    }
}
