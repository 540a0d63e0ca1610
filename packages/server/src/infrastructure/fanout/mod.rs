//! Fan-out を使った EnvelopePublisher 実装
//!
//! ## 責務
//!
//! - Queue published envelopes per lane (chat, typing)
//! - Deliver each envelope to every registry member of its room
//!
//! ## 設計ノート
//!
//! Each lane is a bounded queue drained by one long-lived worker task, so
//! publishes on a lane are serialized: a publish completes its pass over the
//! room before the next one starts. The two lanes are independent, so a
//! burst of typing notices never delays chat messages and vice versa.
//!
//! Workers never write to sockets. They `try_send` the encoded frame into
//! each member's outbound queue; the connection's writer task owns the
//! socket. A full or closed queue skips that recipient only.

pub mod worker;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ClientRegistry, Envelope, EnvelopePublisher, Lane, PublishError};

pub use worker::FanoutWorker;

/// Publishing side of one lane
#[derive(Debug, Clone)]
pub struct Fanout {
    lane: Lane,
    queue: mpsc::Sender<Envelope>,
}

impl Fanout {
    /// Create a lane and the worker that drains it
    pub fn channel(
        lane: Lane,
        registry: Arc<dyn ClientRegistry>,
        capacity: usize,
    ) -> (Self, FanoutWorker) {
        let (queue, receiver) = mpsc::channel(capacity.max(1));
        (Self { lane, queue }, FanoutWorker::new(lane, registry, receiver))
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    /// Queue an envelope, waiting while the lane is full
    pub async fn publish(&self, envelope: Envelope) -> Result<(), PublishError> {
        self.queue
            .send(envelope)
            .await
            .map_err(|_| PublishError::LaneClosed(self.lane))
    }
}

/// Routes envelopes to the chat or typing lane
#[derive(Debug, Clone)]
pub struct FanoutHub {
    chat: Fanout,
    typing: Fanout,
}

impl FanoutHub {
    /// Build a hub from two lanes whose workers the caller runs
    pub fn new(chat: Fanout, typing: Fanout) -> Self {
        Self { chat, typing }
    }

    /// Build both lanes and spawn their workers on the current runtime
    pub fn spawn(
        registry: Arc<dyn ClientRegistry>,
        capacity: usize,
    ) -> (Self, [JoinHandle<()>; 2]) {
        let (chat, chat_worker) = Fanout::channel(Lane::Chat, registry.clone(), capacity);
        let (typing, typing_worker) = Fanout::channel(Lane::Typing, registry, capacity);
        let handles = [
            tokio::spawn(chat_worker.run()),
            tokio::spawn(typing_worker.run()),
        ];
        (Self::new(chat, typing), handles)
    }
}

#[async_trait]
impl EnvelopePublisher for FanoutHub {
    async fn publish(&self, envelope: Envelope) -> Result<(), PublishError> {
        match envelope.lane() {
            Lane::Chat => self.chat.publish(envelope).await,
            Lane::Typing => self.typing.publish(envelope).await,
        }
    }
}
