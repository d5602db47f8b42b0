use tokio::sync::oneshot;
use crate::domain::{MaskedUser, UserCreate, UserPatch};
use crate::user_store::{UpdateOutcome, UserError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages understood by the user service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum UserRequest {
    GetUser {
        id: String,
        respond_to: ServiceResponse<Option<MaskedUser>, UserError>,
    },
    AddUser {
        user: UserCreate,
        respond_to: ServiceResponse<String, UserError>,
    },
    UpdateUser {
        id: String,
        patch: UserPatch,
        respond_to: ServiceResponse<UpdateOutcome, UserError>,
    },
    Shutdown,
    #[cfg(test)]
    GetUserCount {
        respond_to: ServiceResponse<usize, UserError>,
    },
}
