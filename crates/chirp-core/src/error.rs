use thiserror::Error;

/// Failure outcome of an orchestration operation.
///
/// Every variant except [`ServiceError::Store`] is a business-rule
/// rejection: the input was understood and turned down, and the store was
/// left unchanged. [`ServiceError::Store`] wraps an underlying persistence
/// fault and must surface as a server-side failure, never as a client error.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must be at least 4 characters")]
    PasswordTooShort,
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),
    #[error("no account matches the supplied credentials")]
    BadCredentials,
    #[error("message text must not be empty")]
    EmptyText,
    #[error("message text must not exceed 255 characters")]
    TextTooLong,
    #[error("account {0} does not exist")]
    UnknownAccount(i64),
    #[error("message {0} does not exist")]
    UnknownMessage(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ServiceError {
    /// True for business-rule rejections, false for store faults.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
