//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Connected client as listed by `GET /clients`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDto {
    pub id: String,
    pub nickname: String,
    pub color: String,
}

/// Room entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub members: usize,
}
