//! UseCase: クライアント退室処理
//!
//! The single terminal transition of a client: remove it from the registry,
//! clear its typing indicator and announce the departure. The client is
//! unregistered before anything is published, so it never receives its own
//! departure.

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ChatMessage, ClientId, ClientRecord, ClientRegistry, EnvelopePublisher, TypingNotice,
};

use super::error::LeaveError;

/// クライアント退室のユースケース
pub struct LeaveClientUseCase {
    registry: Arc<dyn ClientRegistry>,
    publisher: Arc<dyn EnvelopePublisher>,
    clock: Arc<dyn Clock>,
}

impl LeaveClientUseCase {
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

    /// 退室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ClientRecord))` - 削除されたレコード
    /// * `Ok(None)` - 既に削除済み（何もしない）
    /// * `Err(LeaveError)` - 退室アナウンスの配信に失敗（削除自体は完了している）
    pub async fn execute(&self, client_id: &ClientId) -> Result<Option<ClientRecord>, LeaveError> {
        let Some(record) = self.registry.unregister(client_id).await else {
            tracing::debug!("Client {} already left", client_id);
            return Ok(None);
        };
        tracing::info!(
            "'{}' ({}) disconnected from room '{}'",
            record.nickname,
            record.id,
            record.room
        );

        // 入力中表示の解除は失敗しても退室アナウンスは必ず配信する
        if let Err(e) = self
            .publisher
            .publish(TypingNotice::new(&record, false).into())
            .await
        {
            tracing::warn!("Failed to clear typing state of '{}': {}", record.nickname, e);
        }
        self.publisher
            .publish(ChatMessage::left(&record, self.clock.now()).into())
            .await?;

        Ok(Some(record))
    }
}
