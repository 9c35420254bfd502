use thiserror::Error;

/// Errors surfaced by every repository, whatever backend sits behind it.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    /// Opaque failure from the backing service.
    #[error("transport error: {0:#}")]
    Transport(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        Self::Transport(anyhow::Error::new(e))
    }
}
