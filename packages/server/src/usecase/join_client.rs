//! UseCase: クライアント入室処理
//!
//! Registers a handshaken client and announces its arrival to the room.
//! The announcement is published after registration, so the joining client
//! receives it too.

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ChatMessage, ClientRecord, ClientRegistry, EnvelopePublisher, Nickname, PusherChannel,
    RoomName,
};

use super::error::JoinError;

/// クライアント入室のユースケース
pub struct JoinClientUseCase {
    registry: Arc<dyn ClientRegistry>,
    publisher: Arc<dyn EnvelopePublisher>,
    clock: Arc<dyn Clock>,
}

impl JoinClientUseCase {
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

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `nickname` - 接続時に宣言されたニックネーム
    /// * `room` - 入室するルーム
    /// * `outbound` - クライアントへの送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(ClientRecord)` - 登録されたレコード
    /// * `Err(JoinError)` - 登録失敗（レジストリは変更されない）
    pub async fn execute(
        &self,
        nickname: Nickname,
        room: RoomName,
        outbound: PusherChannel,
    ) -> Result<ClientRecord, JoinError> {
        let record = ClientRecord::new(nickname, room);

        // 1. Registry に登録
        self.registry.register(record.clone(), outbound).await?;
        tracing::info!(
            "'{}' ({}) connected in room '{}'",
            record.nickname,
            record.id,
            record.room
        );

        // 2. 入室アナウンスを本人を含むルーム全員に配信
        let announcement = ChatMessage::joined(&record, self.clock.now());
        if let Err(e) = self.publisher.publish(announcement.into()).await {
            tracing::warn!("Failed to announce '{}': {}", record.nickname, e);
        }

        Ok(record)
    }

    /// Whether `nickname` is free in `room` (checked before the WebSocket upgrade)
    pub async fn is_nickname_available(&self, room: &RoomName, nickname: &Nickname) -> bool {
        !self.registry.is_nickname_taken(room, nickname).await
    }
}
