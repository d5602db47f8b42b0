//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_add_user`] or [`expect_update_user`] to assert behavior.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::clients::UserClient;
use crate::domain::{MaskedUser, UserCreate, UserPatch};
use crate::messages::{ServiceResponse, UserRequest};
use crate::user_store::{UpdateOutcome, UserError};

/// Creates a mock client and a receiver for asserting requests.
///
/// The test plays the part of the service: it reads requests off `receiver`
/// and answers through the enclosed responders, which makes success, failure
/// and slow replies deterministic.
pub fn create_mock_client(buffer_size: usize, timeout: Duration) -> (UserClient, mpsc::Receiver<UserRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (UserClient::new(sender, timeout), receiver)
}

/// Helper to verify that the next message is a GetUser request
pub async fn expect_get_user(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, ServiceResponse<Option<MaskedUser>, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::GetUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an AddUser request
pub async fn expect_add_user(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(UserCreate, ServiceResponse<String, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::AddUser { user, respond_to }) => Some((user, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateUser request
pub async fn expect_update_user(
    receiver: &mut mpsc::Receiver<UserRequest>,
) -> Option<(String, UserPatch, ServiceResponse<UpdateOutcome, UserError>)> {
    match receiver.recv().await {
        Some(UserRequest::UpdateUser { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_mock_client_add() {
        let (client, mut receiver) = create_mock_client(10, TIMEOUT);

        let add_task = tokio::spawn(async move {
            let user = UserCreate::new("Test", 25, "Pune", "test@example.com", "+91-12345-67890");
            client.add_user(user).await
        });

        let (payload, responder) = expect_add_user(&mut receiver).await.expect("Expected AddUser request");
        assert_eq!(payload.name, "Test");
        assert_eq!(payload.age, "25");
        responder.send(Ok("U_0001".to_string())).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result.unwrap(), "U_0001");
    }

    #[tokio::test]
    async fn test_mock_client_update_not_found() {
        let (client, mut receiver) = create_mock_client(10, TIMEOUT);

        let update_task = tokio::spawn(async move {
            client
                .update_user("U_0042".to_string(), UserPatch::default().city("Delhi"))
                .await
        });

        let (id, patch, responder) = expect_update_user(&mut receiver).await.expect("Expected UpdateUser request");
        assert_eq!(id, "U_0042");
        assert_eq!(patch.city.as_deref(), Some("Delhi"));
        responder.send(Err(UserError::NotFound(id))).unwrap();

        let result = update_task.await.unwrap();
        assert!(matches!(result, Err(UserError::NotFound(ref id)) if id == "U_0042"));
    }

    #[tokio::test]
    async fn test_dropped_responder_is_communication_error() {
        let (client, mut receiver) = create_mock_client(10, TIMEOUT);

        let get_task = tokio::spawn(async move { client.get_user("U_0001".to_string()).await });

        let (_, responder) = expect_get_user(&mut receiver).await.expect("Expected GetUser request");
        drop(responder);

        let result = get_task.await.unwrap();
        assert!(matches!(result, Err(UserError::ActorCommunicationError(_))));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let timeout = Duration::from_millis(20);
        let (client, mut receiver) = create_mock_client(10, timeout);

        let get_task = tokio::spawn(async move { client.get_user("U_0001".to_string()).await });

        // Hold the responder without answering.
        let (_, _responder) = expect_get_user(&mut receiver).await.expect("Expected GetUser request");

        let result = get_task.await.unwrap();
        assert!(matches!(result, Err(UserError::Timeout(t)) if t == timeout));
    }

    #[tokio::test]
    async fn test_closed_service_is_communication_error() {
        let (client, receiver) = create_mock_client(10, TIMEOUT);
        drop(receiver);

        let result = client.get_user("U_0001".to_string()).await;
        assert!(matches!(result, Err(UserError::ActorCommunicationError(_))));
    }
}
