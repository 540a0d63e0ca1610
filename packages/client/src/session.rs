//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use roomcast_server::{domain::DEFAULT_ROOM, infrastructure::dto::websocket::OutboundFrame};
use rustyline::{DefaultEditor, error::ReadlineError};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};
use url::Url;

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Connection settings of one client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:3000/ws`
    pub url: String,
    pub nickname: String,
    pub room: String,
    /// Display color announced with each message
    pub color: Option<String>,
}

impl ClientOptions {
    pub fn new(url: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            nickname: nickname.into(),
            room: DEFAULT_ROOM.to_string(),
            color: None,
        }
    }

    /// Endpoint URL with the `nickname` and `room` query parameters
    pub fn connect_url(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.url)?;
        url.query_pairs_mut()
            .append_pair("nickname", &self.nickname)
            .append_pair("room", &self.room);
        Ok(url)
    }
}

#[derive(Debug, Serialize)]
struct OutgoingAuthor<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<&'a str>,
}

/// Chat frame sent by this client; the server fills in identity and time
#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    kind: &'static str,
    from: OutgoingAuthor<'a>,
    content: &'a str,
}

fn encode_line(line: &str, color: Option<&str>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OutgoingMessage {
        kind: "message",
        from: OutgoingAuthor { color },
        content: line,
    })
}

fn handshake_error(options: &ClientOptions, error: WsError) -> ClientError {
    match error {
        WsError::Http(response) if response.status().as_u16() == 409 => ClientError::NicknameTaken {
            nickname: options.nickname.clone(),
            room: options.room.clone(),
        },
        WsError::Http(response) => ClientError::Rejected(response.status().as_u16()),
        other => ClientError::ConnectionError(other.to_string()),
    }
}

/// Run the WebSocket client session
pub async fn run_client_session(options: &ClientOptions) -> Result<(), ClientError> {
    let url = options.connect_url()?;

    let (ws_stream, _response) = connect_async(url.as_str())
        .await
        .map_err(|e| handshake_error(options, e))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}' in room '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        options.nickname, options.room
    );

    let (mut write, mut read) = ws_stream.split();

    // Spawn a task to handle incoming messages
    let nickname_for_read = options.nickname.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundFrame>(text.as_str()) {
                        Ok(frame) => MessageFormatter::format_frame(&frame, &nickname_for_read),
                        // If parsing fails, display as raw text
                        Err(_) => Some(MessageFormatter::format_raw_message(text.as_str())),
                    };
                    if let Some(formatted) = formatted {
                        print!("{}", formatted);
                        redisplay_prompt(&nickname_for_read);
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return true;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return true;
                }
                _ => {}
            }
        }
        true
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let prompt = format!("{}> ", options.nickname);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send each input line as a chat message
    let color = options.color.clone();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let json = match encode_line(&line, color.as_deref()) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Failed to send message: {}", e);
                return true;
            }
        }
        // Input closed (Ctrl+C / Ctrl+D): leave cleanly
        write.close().await.ok();
        false
    });

    // If any one of the tasks completes, abort the other
    let connection_lost = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(true)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(true)
        }
    };

    if connection_lost {
        return Err(ClientError::ConnectionError("Connection lost".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_url_adds_query_parameters() {
        // テスト項目: ニックネームとルームがクエリパラメータとしてエンコードされる
        // given (前提条件):
        let mut options = ClientOptions::new("ws://127.0.0.1:3000/ws", "alice smith");
        options.room = "rust&go".to_string();

        // when (操作):
        let url = options.connect_url().unwrap();

        // then (期待する結果):
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:3000/ws?nickname=alice+smith&room=rust%26go"
        );
    }

    #[test]
    fn test_connect_url_rejects_garbage() {
        let options = ClientOptions::new("not a url", "alice");
        assert!(matches!(
            options.connect_url(),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_encode_line() {
        // テスト項目: 入力行はチャットメッセージとして送信され、色は指定時のみ含まれる
        assert_eq!(
            encode_line("hi", Some("#ff0000")).unwrap(),
            r##"{"kind":"message","from":{"color":"#ff0000"},"content":"hi"}"##
        );
        assert_eq!(
            encode_line("hi", None).unwrap(),
            r#"{"kind":"message","from":{},"content":"hi"}"#
        );
    }
}
