//! Server wiring and execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use roomcast_shared::time::{Clock, SystemClock};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    infrastructure::{fanout::FanoutHub, registry::InMemoryClientRegistry},
    usecase::{JoinClientUseCase, LeaveClientUseCase, ListClientsUseCase, RelayEnvelopeUseCase},
};

use super::{
    handler::{clients, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::{AppState, ConnectionSettings},
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::parse();
/// Server::from_config(&config).run(&config.bind_addr()).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    static_dir: PathBuf,
    /// Fan-out レーンのワーカータスク
    workers: Vec<JoinHandle<()>>,
}

impl Server {
    /// Create a new Server instance from already-built use cases
    pub fn new(
        join_client_usecase: Arc<JoinClientUseCase>,
        relay_envelope_usecase: Arc<RelayEnvelopeUseCase>,
        leave_client_usecase: Arc<LeaveClientUseCase>,
        list_clients_usecase: Arc<ListClientsUseCase>,
        connection: ConnectionSettings,
        static_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                join_client_usecase,
                relay_envelope_usecase,
                leave_client_usecase,
                list_clients_usecase,
                connection,
            }),
            static_dir: static_dir.into(),
            workers: Vec::new(),
        }
    }

    /// Wire the registry, fan-out lanes and use cases described by `config`
    ///
    /// Spawns the fan-out workers, so it must be called inside a tokio runtime.
    pub fn from_config(config: &ServerConfig) -> Self {
        let clock = Arc::new(SystemClock::with_utc_offset_hours(config.utc_offset_hours));
        Self::with_clock(config, clock)
    }

    /// Same as [`Server::from_config`] with an explicit clock
    pub fn with_clock(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        // 1. Registry（インメモリ）
        let registry = Arc::new(InMemoryClientRegistry::new());

        // 2. Fan-out（チャット / 入力中通知の 2 レーン）
        let (hub, workers) = FanoutHub::spawn(registry.clone(), config.fanout_queue());
        let publisher = Arc::new(hub);

        // 3. UseCases
        let join_client_usecase = Arc::new(JoinClientUseCase::new(
            registry.clone(),
            publisher.clone(),
            clock.clone(),
        ));
        let relay_envelope_usecase = Arc::new(RelayEnvelopeUseCase::new(
            registry.clone(),
            publisher.clone(),
            clock.clone(),
        ));
        let leave_client_usecase = Arc::new(LeaveClientUseCase::new(
            registry.clone(),
            publisher,
            clock,
        ));
        let list_clients_usecase = Arc::new(ListClientsUseCase::new(registry));

        let mut server = Self::new(
            join_client_usecase,
            relay_envelope_usecase,
            leave_client_usecase,
            list_clients_usecase,
            ConnectionSettings {
                outbound_buffer: config.outbound_buffer(),
                write_timeout: config.write_timeout(),
            },
            config.static_dir.clone(),
        );
        server.workers = workers.into();
        server
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/clients", get(clients))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .fallback_service(ServeDir::new(&self.static_dir))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind `bind_addr` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("Roomcast server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?nickname=<name>&room=<room>", bind_addr);
        tracing::info!("Serving static files from {}", self.static_dir.display());
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;
        for worker in &self.workers {
            worker.abort();
        }
        result
    }
}
