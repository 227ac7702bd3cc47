use thiserror::Error;

/// Errors reported by the identity provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Email address already in use: {0}")]
    EmailTaken(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
