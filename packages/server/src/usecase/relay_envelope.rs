//! UseCase: 受信フレームの中継処理
//!
//! Turns a decoded inbound frame into a server-authoritative envelope and
//! hands it to the fan-out. The sender's identity and room come from the
//! registry, never from the frame; `sentAt` comes from the server clock.

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{ClientId, ClientRegistry, Envelope, EnvelopePublisher, InboundEnvelope};

use super::error::RelayError;

/// 受信フレーム中継のユースケース
pub struct RelayEnvelopeUseCase {
    registry: Arc<dyn ClientRegistry>,
    publisher: Arc<dyn EnvelopePublisher>,
    clock: Arc<dyn Clock>,
}

impl RelayEnvelopeUseCase {
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        publisher: Arc<dyn EnvelopePublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            publisher,
            clock,
        }
    }

    /// 中継を実行
    ///
    /// Adopts the frame's color for the sender if it has none yet, stamps
    /// identity, room and time, then publishes on the lane matching the
    /// envelope kind.
    pub async fn execute(
        &self,
        client_id: &ClientId,
        inbound: InboundEnvelope,
    ) -> Result<(), RelayError> {
        let sender = self
            .registry
            .resolve(client_id, inbound.color().cloned())
            .await
            .ok_or(RelayError::UnknownClient(*client_id))?;

        let envelope = inbound.stamp(&sender, self.clock.now());
        match &envelope {
            Envelope::Message(message) => tracing::info!(
                "ROOM: {} -> {}: {}",
                message.room,
                sender.nickname,
                message.content.as_str()
            ),
            Envelope::Typing(notice) => tracing::debug!(
                "ROOM: {} -> {} is typing: {}",
                notice.room,
                sender.nickname,
                notice.is_typing
            ),
        }

        self.publisher.publish(envelope).await?;
        Ok(())
    }
}
