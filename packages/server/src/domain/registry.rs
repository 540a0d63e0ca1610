//! Client Registry trait 定義
//!
//! The registry is the only state shared between connection tasks. The
//! use-case layer depends on this trait; the infrastructure layer provides
//! the concrete implementation.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    entity::{ClientRecord, RoomSummary},
    error::RegistryError,
    value_object::{ClientId, Color, Nickname, RoomName},
};

/// Outbound queue of one client; the connection's writer task drains it.
pub type PusherChannel = mpsc::Sender<String>;

/// Callback applied to every member of a room while the registry is locked
pub type RoomVisitor<'a> = dyn FnMut(&ClientRecord, &PusherChannel) + Send + 'a;

/// Client Registry trait
///
/// Every operation is atomic with respect to every other one: iteration
/// never observes a half-inserted or half-removed record.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Add a record together with its outbound channel
    ///
    /// Fails if the id is already present or another member of the room
    /// uses the same nickname.
    async fn register(
        &self,
        record: ClientRecord,
        outbound: PusherChannel,
    ) -> Result<(), RegistryError>;

    /// Remove a record; returns it if it was present (no-op otherwise)
    async fn unregister(&self, client_id: &ClientId) -> Option<ClientRecord>;

    /// Apply `visit` to every record currently registered in `room`
    ///
    /// Returns the number of records visited. `visit` runs under the
    /// registry lock and must not block.
    async fn for_each_in_room(&self, room: &RoomName, visit: &mut RoomVisitor<'_>) -> usize;

    /// Look up a record, adopting `color_hint` first if the record has no color yet
    async fn resolve(&self, client_id: &ClientId, color_hint: Option<Color>)
    -> Option<ClientRecord>;

    /// Snapshot of the records registered in `room`
    async fn members(&self, room: &RoomName) -> Vec<ClientRecord>;

    /// Whether a live member of `room` already uses `nickname`
    async fn is_nickname_taken(&self, room: &RoomName, nickname: &Nickname) -> bool;

    /// Non-empty rooms with their member counts
    async fn rooms(&self) -> Vec<RoomSummary>;
}
