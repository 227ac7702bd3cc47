use tokio::sync::oneshot;
use crate::domain::{Session, SessionState};
use crate::auth_actor::AuthError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the identity provider. Each variant includes its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum AuthRequest {
    GetSession {
        respond_to: ServiceResponse<SessionState, AuthError>,
    },
    UpdateUser {
        email: String,
        respond_to: ServiceResponse<(), AuthError>,
    },
    SignIn {
        session: Session,
        respond_to: ServiceResponse<(), AuthError>,
    },
    SignOut {
        respond_to: ServiceResponse<(), AuthError>,
    },
}
