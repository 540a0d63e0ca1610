//! UseCase: 接続中クライアント一覧の取得
//!
//! Read-only queries served straight from the registry.

use std::sync::Arc;

use crate::domain::{ClientRecord, ClientRegistry, RoomName, RoomSummary};

/// 接続中クライアント一覧取得のユースケース
pub struct ListClientsUseCase {
    registry: Arc<dyn ClientRegistry>,
}

impl ListClientsUseCase {
    pub fn new(registry: Arc<dyn ClientRegistry>) -> Self {
        Self { registry }
    }

    /// Members of `room`, sorted by nickname
    pub async fn execute(&self, room: &RoomName) -> Vec<ClientRecord> {
        let mut members = self.registry.members(room).await;
        members.sort_by(|a, b| a.nickname.as_str().cmp(b.nickname.as_str()));
        members
    }

    /// Non-empty rooms with member counts, sorted by room name
    pub async fn rooms(&self) -> Vec<RoomSummary> {
        self.registry.rooms().await
    }
}
