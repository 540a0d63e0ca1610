//! UseCase layer
//!
//! One use case per client lifecycle step. Each depends only on the domain
//! ports (`ClientRegistry`, `EnvelopePublisher`) and a `Clock`.

pub mod error;
pub mod join_client;
pub mod leave_client;
pub mod list_clients;
pub mod relay_envelope;

pub use error::{JoinError, LeaveError, RelayError};
pub use join_client::JoinClientUseCase;
pub use leave_client::LeaveClientUseCase;
pub use list_clients::ListClientsUseCase;
pub use relay_envelope::RelayEnvelopeUseCase;
