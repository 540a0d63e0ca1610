//! Envelope publisher trait 定義
//!
//! Abstraction over the fan-out: use cases hand envelopes to a publisher and
//! never touch client connections directly.

use async_trait::async_trait;

use super::{envelope::Envelope, error::PublishError};

/// Queues envelopes for delivery to every member of the envelope's room
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnvelopePublisher: Send + Sync {
    /// Submit an envelope to the lane matching its kind
    async fn publish(&self, envelope: Envelope) -> Result<(), PublishError>;
}
