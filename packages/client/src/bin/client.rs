//! Roomcast terminal chat client.
//!
//! Joins a room with a nickname and sends each input line as a chat message.
//! Reconnects on lost connections (max 5 attempts with 5 second interval).
//! Taken, empty or reserved nicknames are rejected by the server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client -- --nickname alice
//! cargo run --bin roomcast-client -- -n bob -r rust --color "#ff8800"
//! ```

use clap::Parser;
use roomcast_client::{ClientOptions, run_client};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-client")]
#[command(about = "Terminal client for the Roomcast chat relay", long_about = None)]
struct Args {
    /// Nickname shown to the room (must be unique within the room)
    #[arg(short = 'n', long)]
    nickname: String,

    /// Room to join
    #[arg(short = 'r', long, default_value = "general")]
    room: String,

    /// Display color sent with messages (e.g. "#ff8800")
    #[arg(short = 'c', long)]
    color: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let options = ClientOptions {
        url: args.url,
        nickname: args.nickname,
        room: args.room,
        color: args.color,
    };

    // Run the client
    if let Err(e) = run_client(options).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
