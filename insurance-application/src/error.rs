use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("profile not found for session '{0}'")]
    ProfileNotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
