//! # Mock Framework
//!
//! Utilities for testing the flows against scripted collaborators.
//!
//! Use [`create_mock_client`] or [`create_mock_auth_client`] to get a client
//! and a receiver. Then use helpers like [`expect_get`] or
//! [`expect_update_user`] to assert the requests a flow issues, in order, and
//! to answer them.

use tokio::sync::{mpsc, oneshot};
use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::auth_actor::AuthError;
use crate::clients::AuthClient;
use crate::domain::SessionState;
use crate::messages::AuthRequest;

type Reply<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Creates a mock table client and a receiver for asserting requests.
///
/// Nothing answers the requests on its own: the test plays the table by
/// receiving each request and sending the response it wants the flow to see.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Same as [`create_mock_client`] for the identity provider.
pub fn create_mock_auth_client(buffer_size: usize) -> (AuthClient, mpsc::Receiver<AuthRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (AuthClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Reply<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Id, T::Patch, Reply<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next auth message is a GetSession request
pub async fn expect_get_session(receiver: &mut mpsc::Receiver<AuthRequest>) -> Option<oneshot::Sender<Result<SessionState, AuthError>>> {
    match receiver.recv().await {
        Some(AuthRequest::GetSession { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next auth message is an UpdateUser request
pub async fn expect_update_user(receiver: &mut mpsc::Receiver<AuthRequest>) -> Option<(String, oneshot::Sender<Result<(), AuthError>>)> {
    match receiver.recv().await {
        Some(AuthRequest::UpdateUser { email, respond_to }) => Some((email, respond_to)),
        _ => None,
    }
}

/// True when no request is waiting. Call after the flow under test finished.
pub fn is_drained<M>(receiver: &mut mpsc::Receiver<M>) -> bool {
    receiver.try_recv().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProfileClient;
    use crate::domain::{Profile, ProfilePatch, Role, Session};

    #[tokio::test]
    async fn test_mock_client() {
        let (inner, mut receiver) = create_mock_client::<Profile>(10);
        let client = ProfileClient::new(inner);

        let update_task = tokio::spawn(async move {
            let patch = ProfilePatch { name: Some("Test".to_string()), email: None };
            client.update_profile("user_1".to_string(), patch).await
        });

        let (id, patch, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, "user_1");
        assert_eq!(patch.name.as_deref(), Some("Test"));
        let profile = Profile {
            id: "user_1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role: Role::Client,
        };
        responder.send(Ok(profile.clone())).unwrap();

        let result = update_task.await.unwrap();
        assert_eq!(result, Ok(profile));
        assert!(is_drained(&mut receiver));
    }

    #[tokio::test]
    async fn test_mock_auth_client() {
        let (client, mut receiver) = create_mock_auth_client(10);

        let task = tokio::spawn(async move { client.get_session().await });

        let responder = expect_get_session(&mut receiver).await.expect("Expected GetSession request");
        let session = Session::new("user_1", "test@example.com");
        responder.send(Ok(SessionState::Authenticated(session.clone()))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(SessionState::Authenticated(session)));
    }
}
