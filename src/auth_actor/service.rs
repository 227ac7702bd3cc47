use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use crate::clients::AuthClient;
use crate::domain::{Session, SessionState};
use crate::messages::{AuthRequest, ServiceResponse};
use super::AuthError;

/// In-process identity provider holding the current session.
///
/// An accepted email change reserves the address for the requesting account;
/// the session keeps its current email until the user confirms the change
/// out of band.
pub struct AuthService {
    receiver: mpsc::Receiver<AuthRequest>,
    session: Option<Session>,
    /// Email address -> owning user id.
    registered_emails: HashMap<String, String>,
}

impl AuthService {
    pub fn new(buffer_size: usize) -> (Self, AuthClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            session: None,
            registered_emails: HashMap::new(),
        };
        (service, AuthClient::new(sender))
    }

    #[instrument(name = "auth_service", skip(self))]
    pub async fn run(mut self) {
        info!("AuthService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AuthRequest::GetSession { respond_to } => self.handle_get_session(respond_to),
                AuthRequest::UpdateUser { email, respond_to } => self.handle_update_user(email, respond_to),
                AuthRequest::SignIn { session, respond_to } => self.handle_sign_in(session, respond_to),
                AuthRequest::SignOut { respond_to } => self.handle_sign_out(respond_to),
            }
        }
        info!("AuthService stopped");
    }

    fn handle_get_session(&self, respond_to: ServiceResponse<SessionState, AuthError>) {
        debug!("Processing get_session request");
        let state = match &self.session {
            Some(session) => SessionState::Authenticated(session.clone()),
            None => SessionState::Unauthenticated,
        };
        let _ = respond_to.send(Ok(state));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_update_user(&mut self, email: String, respond_to: ServiceResponse<(), AuthError>) {
        let Some(session) = &self.session else {
            warn!("Email change requested without a session");
            let _ = respond_to.send(Err(AuthError::NotAuthenticated));
            return;
        };
        if !is_plausible_email(&email) {
            let _ = respond_to.send(Err(AuthError::InvalidEmail(email)));
            return;
        }
        if self.registered_emails.get(&email).is_some_and(|owner| *owner != session.user_id) {
            let _ = respond_to.send(Err(AuthError::EmailTaken(email)));
            return;
        }
        info!(user_id = %session.user_id, "Email change pending confirmation");
        self.registered_emails.insert(email, session.user_id.clone());
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(fields(user_id = %session.user_id), skip(self, session, respond_to))]
    fn handle_sign_in(&mut self, session: Session, respond_to: ServiceResponse<(), AuthError>) {
        info!("Session started");
        self.registered_emails.insert(session.email.clone(), session.user_id.clone());
        self.session = Some(session);
        let _ = respond_to.send(Ok(()));
    }

    fn handle_sign_out(&mut self, respond_to: ServiceResponse<(), AuthError>) {
        if let Some(session) = self.session.take() {
            info!(user_id = %session.user_id, "Session ended");
        }
        let _ = respond_to.send(Ok(()));
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> AuthClient {
        let (service, client) = AuthService::new(8);
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let client = start();
        assert_eq!(client.get_session().await, Ok(SessionState::Unauthenticated));

        let session = Session::new("user_1", "ada@example.com");
        client.sign_in(session.clone()).await.unwrap();
        assert_eq!(client.get_session().await, Ok(SessionState::Authenticated(session)));

        client.sign_out().await.unwrap();
        assert_eq!(client.get_session().await, Ok(SessionState::Unauthenticated));
    }

    #[tokio::test]
    async fn test_update_user_requires_session_and_valid_email() {
        let client = start();
        assert_eq!(
            client.update_user("new@example.com".to_string()).await,
            Err(AuthError::NotAuthenticated)
        );

        client.sign_in(Session::new("user_1", "ada@example.com")).await.unwrap();
        assert_eq!(
            client.update_user("not-an-email".to_string()).await,
            Err(AuthError::InvalidEmail("not-an-email".to_string()))
        );
        assert_eq!(client.update_user("new@example.com".to_string()).await, Ok(()));
    }

    #[tokio::test]
    async fn test_update_user_rejects_email_of_another_account() {
        let client = start();
        client.sign_in(Session::new("user_2", "grace@example.com")).await.unwrap();
        client.sign_in(Session::new("user_1", "ada@example.com")).await.unwrap();

        assert_eq!(
            client.update_user("grace@example.com".to_string()).await,
            Err(AuthError::EmailTaken("grace@example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_requested_email_is_reserved() {
        let client = start();
        client.sign_in(Session::new("user_1", "ada@example.com")).await.unwrap();
        assert_eq!(client.update_user("shared@example.com".to_string()).await, Ok(()));
        assert_eq!(client.update_user("shared@example.com".to_string()).await, Ok(()));

        client.sign_in(Session::new("user_2", "grace@example.com")).await.unwrap();
        assert_eq!(
            client.update_user("shared@example.com".to_string()).await,
            Err(AuthError::EmailTaken("shared@example.com".to_string()))
        );
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("a@b.io"));
        assert!(!is_plausible_email("@b.io"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a b@c.io"));
    }
}
