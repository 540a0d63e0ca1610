//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{ClientDto, RoomSummaryDto},
    ui::state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub room: Option<String>,
}

/// List clients connected to a room (`general` when `room` is omitted)
pub async fn clients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientsQuery>,
) -> Json<Vec<ClientDto>> {
    let room = RoomName::or_default(query.room);
    let members = state.list_clients_usecase.execute(&room).await;

    // Domain Model から DTO への変換
    Json(members.iter().map(ClientDto::from).collect())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of non-empty rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.list_clients_usecase.rooms().await;
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}
