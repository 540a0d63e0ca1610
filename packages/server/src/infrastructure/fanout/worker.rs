//! Fan-out worker: drains one lane and delivers to room members.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::{
    domain::{ClientRegistry, Envelope, Lane},
    infrastructure::codec,
};

/// Outcome of delivering one envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Recipients whose outbound queue accepted the frame
    pub delivered: usize,
    /// Recipients skipped because their queue was full or closed
    pub skipped: usize,
}

/// Long-lived task state of one lane
pub struct FanoutWorker {
    lane: Lane,
    registry: Arc<dyn ClientRegistry>,
    queue: mpsc::Receiver<Envelope>,
}

impl FanoutWorker {
    pub(super) fn new(
        lane: Lane,
        registry: Arc<dyn ClientRegistry>,
        queue: mpsc::Receiver<Envelope>,
    ) -> Self {
        Self {
            lane,
            registry,
            queue,
        }
    }

    /// Deliver queued envelopes until every publisher is dropped
    pub async fn run(mut self) {
        tracing::info!("{} fan-out worker started", self.lane);

        while let Some(envelope) = self.queue.recv().await {
            deliver(self.registry.as_ref(), &envelope).await;
        }

        tracing::info!("{} fan-out worker stopped", self.lane);
    }
}

/// Encode `envelope` once and offer it to every member of its room
///
/// A recipient whose queue is full or closed is skipped; it is never
/// unregistered here.
pub async fn deliver(registry: &dyn ClientRegistry, envelope: &Envelope) -> Delivery {
    let payload = match codec::encode(envelope) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Dropping envelope for room '{}': {}", envelope.room(), e);
            return Delivery::default();
        }
    };

    let mut delivery = Delivery::default();
    registry
        .for_each_in_room(envelope.room(), &mut |record, outbound| {
            match outbound.try_send(payload.clone()) {
                Ok(()) => delivery.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    delivery.skipped += 1;
                    tracing::warn!(
                        "Outbound queue of '{}' ({}) is full, skipping",
                        record.nickname,
                        record.id
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    delivery.skipped += 1;
                    tracing::debug!(
                        "Outbound queue of '{}' ({}) is closed, skipping",
                        record.nickname,
                        record.id
                    );
                }
            }
        })
        .await;

    tracing::debug!(
        "{} envelope fanned out in room '{}': {} delivered, {} skipped",
        envelope.lane(),
        envelope.room(),
        delivery.delivered,
        delivery.skipped
    );

    delivery
}
