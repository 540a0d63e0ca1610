//! Roomcast chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 127.0.0.1 --port 8080 --static-dir ./public
//! ```

use clap::Parser;
use roomcast_server::{config::ServerConfig, ui::Server};
use roomcast_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::parse();
    tracing::debug!("Configuration: {:?}", config);

    let server = Server::from_config(&config);
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
