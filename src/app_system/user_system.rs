use tracing::{error, info};

use crate::clients::UserClient;
use crate::config::AppConfig;
use crate::masking::PhoneMasker;
use crate::storage::{CsvTable, TableStorage};
use crate::user_actor::UserService;
use crate::user_store::{UserError, UserStore};

/// Starts the user service and hands out its client.
pub struct UserSystem {
    pub user_client: UserClient,
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Spawns a service over `store`. Must be called inside a Tokio runtime.
    pub fn start<S: TableStorage + 'static>(store: UserStore<S>, config: &AppConfig) -> Self {
        let (service, user_client) = UserService::new(config.buffer_size.max(1), store, config.timeout());
        let handle = tokio::spawn(service.run());
        Self { user_client, handle }
    }

    /// The usual wiring: a CSV table at the configured path.
    pub fn from_config(config: &AppConfig) -> Self {
        info!(db_path = %config.db_path.display(), "Starting user system");
        let store = UserStore::with_masker(
            CsvTable::new(&config.db_path),
            PhoneMasker::new(config.country_code.clone()),
        );
        Self::start(store, config)
    }

    pub async fn shutdown(self) -> Result<(), UserError> {
        info!("Shutting down system...");
        self.user_client.shutdown().await?;

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(UserError::ActorCommunicationError(format!("Actor task failed: {:?}", e)));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
