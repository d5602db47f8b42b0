use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::clients::UserClient;
use crate::domain::{MaskedUser, UserCreate, UserPatch};
use crate::messages::{ServiceResponse, UserRequest};
use crate::storage::TableStorage;
use crate::user_store::{UpdateOutcome, UserError, UserStore};

/// Serves [`UserRequest`]s against a [`UserStore`].
///
/// Store calls are blocking file I/O and run inline on the actor task. Requests
/// are handled strictly in arrival order.
pub struct UserService<S> {
    receiver: mpsc::Receiver<UserRequest>,
    store: UserStore<S>,
}

impl<S: TableStorage + 'static> UserService<S> {
    pub fn new(buffer_size: usize, store: UserStore<S>, timeout: Duration) -> (Self, UserClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = UserClient::new(sender, timeout);
        (service, client)
    }

    #[instrument(name = "user_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                UserRequest::GetUser { id, respond_to } => {
                    self.handle_get_user(id, respond_to);
                }
                UserRequest::AddUser { user, respond_to } => {
                    self.handle_add_user(user, respond_to);
                }
                UserRequest::UpdateUser { id, patch, respond_to } => {
                    self.handle_update_user(id, patch, respond_to);
                }
                UserRequest::Shutdown => {
                    info!("UserService shutting down");
                    break;
                }
                #[cfg(test)]
                UserRequest::GetUserCount { respond_to } => {
                    let count = self.store.storage().load_all().map(|rows| rows.len());
                    let _ = respond_to.send(count.map_err(UserError::from));
                }
            }
        }
        info!("UserService stopped");
    }

    #[instrument(fields(user_id = %id), skip(self, id, respond_to))]
    fn handle_get_user(&self, id: String, respond_to: ServiceResponse<Option<MaskedUser>, UserError>) {
        debug!("Processing get_user request");
        let result = self.store.read_user(&id);
        match &result {
            Ok(Some(user)) => info!(user_name = %user.name, "User found"),
            Ok(None) => debug!("User not found"),
            Err(e) => error!(error = %e, "Failed to read user"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, user, respond_to))]
    fn handle_add_user(&self, user: UserCreate, respond_to: ServiceResponse<String, UserError>) {
        debug!("Processing add_user request");
        let result = self.store.add_user(user);
        if let Err(e) = &result {
            error!(error = %e, "Failed to add user");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(user_id = %id), skip(self, id, patch, respond_to))]
    fn handle_update_user(
        &self,
        id: String,
        patch: UserPatch,
        respond_to: ServiceResponse<UpdateOutcome, UserError>,
    ) {
        debug!("Processing update_user request");
        let result = self.store.update_user(&id, patch);
        match &result {
            Ok(outcome) => info!(%outcome, "Update handled"),
            Err(UserError::NotFound(_)) => warn!("Update target not found"),
            Err(e) => error!(error = %e, "Failed to update user"),
        }
        let _ = respond_to.send(result);
    }
}
