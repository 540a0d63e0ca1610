//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    JoinClientUseCase, LeaveClientUseCase, ListClientsUseCase, RelayEnvelopeUseCase,
};

/// Per-connection transport settings
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    /// 送信キューの容量
    pub outbound_buffer: usize,
    /// 1 フレームあたりの書き込みタイムアウト
    pub write_timeout: Duration,
}

/// Shared application state
pub struct AppState {
    /// JoinClientUseCase（入室のユースケース）
    pub join_client_usecase: Arc<JoinClientUseCase>,
    /// RelayEnvelopeUseCase（フレーム中継のユースケース）
    pub relay_envelope_usecase: Arc<RelayEnvelopeUseCase>,
    /// LeaveClientUseCase（退室のユースケース）
    pub leave_client_usecase: Arc<LeaveClientUseCase>,
    /// ListClientsUseCase（クライアント一覧取得のユースケース）
    pub list_clients_usecase: Arc<ListClientsUseCase>,
    pub connection: ConnectionSettings,
}
