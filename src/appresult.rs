use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// `Input` means the caller handed us something malformed or conflicting,
/// `Access` means the token is dead or the caller lacks permission.
/// The message is the bare reason; callers add their own context.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Access(String),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn access(msg: impl Into<String>) -> Self {
        Self::Access(msg.into())
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn is_access(&self) -> bool {
        matches!(self, Self::Access(_))
    }
}
