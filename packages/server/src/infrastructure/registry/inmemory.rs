//! InMemory Client Registry 実装
//!
//! Records are kept in a `HashMap` keyed by client id, with a secondary
//! room → member-set index so that room-scoped iteration only touches the
//! members of that room. Both maps live behind one `tokio::sync::Mutex`,
//! which keeps them consistent with each other.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ClientId, ClientRecord, ClientRegistry, Color, Nickname, PusherChannel, RegistryError,
    RoomName, RoomSummary, RoomVisitor,
};

struct Entry {
    record: ClientRecord,
    outbound: PusherChannel,
}

#[derive(Default)]
struct RegistryState {
    clients: HashMap<ClientId, Entry>,
    rooms: HashMap<RoomName, BTreeSet<ClientId>>,
}

impl RegistryState {
    fn room_members(&self, room: &RoomName) -> impl Iterator<Item = &Entry> {
        self.rooms
            .get(room)
            .into_iter()
            .flatten()
            .filter_map(|id| self.clients.get(id))
    }
}

/// インメモリ Client Registry 実装
#[derive(Default)]
pub struct InMemoryClientRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered clients across all rooms
    pub async fn len(&self) -> usize {
        self.state.lock().await.clients.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ClientRegistry for InMemoryClientRegistry {
    async fn register(
        &self,
        record: ClientRecord,
        outbound: PusherChannel,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.lock().await;

        if state.clients.contains_key(&record.id) {
            return Err(RegistryError::DuplicateClient(record.id));
        }
        if state
            .room_members(&record.room)
            .any(|entry| entry.record.nickname == record.nickname)
        {
            return Err(RegistryError::NicknameTaken {
                nickname: record.nickname.into_string(),
                room: record.room.into_string(),
            });
        }

        state
            .rooms
            .entry(record.room.clone())
            .or_default()
            .insert(record.id);
        tracing::debug!(
            "Client '{}' ({}) registered in room '{}'",
            record.nickname,
            record.id,
            record.room
        );
        state.clients.insert(record.id, Entry { record, outbound });

        Ok(())
    }

    async fn unregister(&self, client_id: &ClientId) -> Option<ClientRecord> {
        let mut state = self.state.lock().await;

        let entry = state.clients.remove(client_id)?;
        if let Some(members) = state.rooms.get_mut(&entry.record.room) {
            members.remove(client_id);
            if members.is_empty() {
                state.rooms.remove(&entry.record.room);
            }
        }
        tracing::debug!(
            "Client '{}' ({}) unregistered from room '{}'",
            entry.record.nickname,
            client_id,
            entry.record.room
        );

        Some(entry.record)
    }

    async fn for_each_in_room(&self, room: &RoomName, visit: &mut RoomVisitor<'_>) -> usize {
        let state = self.state.lock().await;

        let mut visited = 0;
        for entry in state.room_members(room) {
            visit(&entry.record, &entry.outbound);
            visited += 1;
        }
        visited
    }

    async fn resolve(
        &self,
        client_id: &ClientId,
        color_hint: Option<Color>,
    ) -> Option<ClientRecord> {
        let mut state = self.state.lock().await;

        let entry = state.clients.get_mut(client_id)?;
        if let Some(color) = color_hint
            && entry.record.adopt_color(color)
        {
            tracing::debug!(
                "Client '{}' adopted color {:?}",
                entry.record.nickname,
                entry.record.color
            );
        }
        Some(entry.record.clone())
    }

    async fn members(&self, room: &RoomName) -> Vec<ClientRecord> {
        let state = self.state.lock().await;
        state
            .room_members(room)
            .map(|entry| entry.record.clone())
            .collect()
    }

    async fn is_nickname_taken(&self, room: &RoomName, nickname: &Nickname) -> bool {
        let state = self.state.lock().await;
        state
            .room_members(room)
            .any(|entry| &entry.record.nickname == nickname)
    }

    async fn rooms(&self) -> Vec<RoomSummary> {
        let state = self.state.lock().await;
        let mut rooms: Vec<RoomSummary> = state
            .rooms
            .iter()
            .map(|(room, members)| RoomSummary {
                room: room.clone(),
                members: members.len(),
            })
            .collect();
        rooms.sort_by(|a, b| a.room.cmp(&b.room));
        rooms
    }
}
