use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};
use crate::auth_actor::AuthError;
use crate::domain::{Session, SessionState};
use crate::messages::AuthRequest;

/// Client for the identity provider.
#[derive(Clone)]
pub struct AuthClient {
    sender: mpsc::Sender<AuthRequest>,
}

impl AuthClient {
    pub fn new(sender: mpsc::Sender<AuthRequest>) -> Self {
        Self { sender }
    }
}

client_method!(AuthClient => fn get_session() -> SessionState as AuthRequest::GetSession, Error = AuthError);
client_method!(AuthClient => fn update_user(email: String) -> () as AuthRequest::UpdateUser, Error = AuthError);
client_method!(AuthClient => fn sign_in(session: Session) -> () as AuthRequest::SignIn, Error = AuthError);
client_method!(AuthClient => fn sign_out() -> () as AuthRequest::SignOut, Error = AuthError);
