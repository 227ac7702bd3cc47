use thiserror::Error;

/// Errors that can occur while reading or updating profiles.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error("Profile validation error: {0}")]
    ValidationError(String),
    #[error("Not allowed to update profile: {0}")]
    Unauthorized(String),
    #[error("Identity provider error: {0}")]
    IdentityProviderError(String),
    #[error("Profile database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
