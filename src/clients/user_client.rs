use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{MaskedUser, UserCreate, UserPatch};
use crate::messages::UserRequest;
use crate::user_store::{UpdateOutcome, UserError};

/// Client for interacting with the user service.
///
/// Every call is bounded by `timeout`; when it elapses the caller gets
/// [`UserError::Timeout`] while the service may still complete the request.
#[derive(Clone)]
pub struct UserClient {
    sender: mpsc::Sender<UserRequest>,
    timeout: Duration,
}

impl UserClient {
    pub fn new(sender: mpsc::Sender<UserRequest>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    /// Asks the service to stop after the requests already queued.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), UserError> {
        debug!("Sending shutdown");
        self.sender
            .send(UserRequest::Shutdown)
            .await
            .map_err(|_| UserError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(UserClient => fn get_user(id: String) -> Option<MaskedUser> as UserRequest::GetUser);
client_method!(UserClient => fn add_user(user: UserCreate) -> String as UserRequest::AddUser, skip(user));
client_method!(UserClient => fn update_user(id: String, patch: UserPatch) -> UpdateOutcome as UserRequest::UpdateUser, skip(patch));
#[cfg(test)]
client_method!(UserClient => fn get_user_count() -> usize as UserRequest::GetUserCount);
