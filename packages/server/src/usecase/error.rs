//! UseCase errors

use thiserror::Error;

use crate::domain::{ClientId, PublishError, RegistryError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// The sending connection is no longer in the registry
    #[error("client '{0}' is not registered")]
    UnknownClient(ClientId),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error(transparent)]
    Publish(#[from] PublishError),
}
