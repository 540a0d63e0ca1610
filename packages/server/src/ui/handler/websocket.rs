//! WebSocket connection handlers.
//!
//! Each connection gets two tasks: a writer draining the client's bounded
//! outbound queue into the socket, and the reader loop below. The reader is
//! the only path that removes a client: when it sees a close frame, a read
//! error or the end of the stream, the client leaves the registry.

use std::{fmt::Display, sync::Arc, time::Duration};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::Deserialize;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{ClientId, Nickname, RoomName},
    infrastructure::codec,
    ui::state::AppState,
    usecase::{RelayEnvelopeUseCase, RelayError},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub nickname: Option<String>,
    pub room: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> Nickname / RoomName (Domain Model)
    let nickname = match Nickname::new(query.nickname.unwrap_or_default()) {
        Ok(nickname) => nickname,
        Err(e) => {
            tracing::warn!("Rejecting handshake: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let room = RoomName::or_default(query.room);

    if !state
        .join_client_usecase
        .is_nickname_available(&room, &nickname)
        .await
    {
        tracing::warn!(
            "Rejecting handshake: nickname '{}' is already in room '{}'",
            nickname,
            room
        );
        return Err(StatusCode::CONFLICT);
    }

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, nickname, room)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, nickname: Nickname, room: RoomName) {
    let settings = state.connection;
    let (tx, rx) = mpsc::channel(settings.outbound_buffer.max(1));

    // The writer starts first so the join announcement reaches the new client.
    let (sender, receiver) = socket.split();
    let send_task = pusher_loop(rx, sender, settings.write_timeout, nickname.to_string());

    let client = match state.join_client_usecase.execute(nickname, room, tx).await {
        Ok(client) => client,
        Err(e) => {
            // Lost a race with another handshake for the same nickname.
            tracing::warn!("Join failed after upgrade: {}", e);
            send_task.abort();
            return;
        }
    };

    reader_loop(receiver, &client.id, &state.relay_envelope_usecase).await;

    match state.leave_client_usecase.execute(&client.id).await {
        Ok(_) => tracing::debug!("Client {} cleaned up", client.id),
        Err(e) => tracing::warn!("Failed to announce departure of '{}': {}", client.nickname, e),
    }
    send_task.abort();
}

/// Spawns a task that drains `rx` into the WebSocket sink.
///
/// A write that does not finish within `write_timeout` is abandoned and the
/// task moves on to the next frame; a write error ends the task. Neither
/// removes the client.
fn pusher_loop<S>(
    mut rx: mpsc::Receiver<String>,
    mut sender: S,
    write_timeout: Duration,
    nickname: String,
) -> JoinHandle<()>
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: Display,
{
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match tokio::time::timeout(write_timeout, sender.send(Message::Text(frame.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!("Failed to write to '{}': {}", nickname, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Write to '{}' timed out after {:?}, write abandoned",
                        nickname,
                        write_timeout
                    );
                }
            }
        }
    })
}

/// Reads frames until the connection ends, relaying every valid one.
///
/// Malformed frames and unknown kinds are logged and skipped; the connection
/// stays open.
async fn reader_loop<S, E>(mut receiver: S, client_id: &ClientId, relay: &RelayEnvelopeUseCase)
where
    S: Stream<Item = Result<Message, E>> + Unpin,
    E: Display,
{
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::info!("Read from {} failed: {}", client_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let inbound = match codec::decode(text.as_str()) {
                    Ok(inbound) => inbound,
                    Err(e) => {
                        tracing::warn!("Discarding frame from {}: {}", client_id, e);
                        continue;
                    }
                };
                match relay.execute(client_id, inbound).await {
                    Ok(()) => {}
                    Err(RelayError::UnknownClient(_)) => {
                        tracing::warn!("Client {} is no longer registered", client_id);
                        break;
                    }
                    Err(e) => tracing::error!("Failed to relay frame from {}: {}", client_id, e),
                }
            }
            Message::Close(_) => {
                tracing::info!("Client {} requested close", client_id);
                break;
            }
            Message::Binary(data) => {
                tracing::warn!(
                    "Discarding binary frame ({} bytes) from {}",
                    data.len(),
                    client_id
                );
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Pong(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        pin::Pin,
        sync::atomic::{AtomicUsize, Ordering},
        task::{Context, Poll},
    };

    use super::*;
    use crate::{
        domain::{ClientRecord, ClientRegistry, Envelope, publisher::MockEnvelopePublisher},
        infrastructure::registry::InMemoryClientRegistry,
    };
    use futures_util::{sink, stream};
    use roomcast_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - reader_loop: 不正なフレームを読み飛ばして次のフレームを中継すること
    // - reader_loop: Close / 読み取りエラーで終了すること
    // - pusher_loop: キューの順序どおりに書き込み、書き込みエラーで終了すること
    // - pusher_loop: 書き込みがタイムアウトしても終了せず次のフレームに進むこと
    // ========================================

    /// Socket whose flush never completes; counts the frames handed to it
    struct StalledSocket {
        attempts: Arc<AtomicUsize>,
    }

    impl Sink<Message> for StalledSocket {
        type Error = io::Error;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
            Poll::Ready(Ok(()))
        }

        fn start_send(self: Pin<&mut Self>, _item: Message) -> Result<(), io::Error> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
            Poll::Pending
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
            Poll::Pending
        }
    }

    async fn registered(registry: &InMemoryClientRegistry) -> ClientRecord {
        let record = ClientRecord::new(
            Nickname::new("alice".to_string()).unwrap(),
            RoomName::default(),
        );
        let (tx, _rx) = mpsc::channel(8);
        registry.register(record.clone(), tx).await.unwrap();
        record
    }

    fn text(frame: &str) -> Result<Message, io::Error> {
        Ok(Message::Text(frame.to_string().into()))
    }

    #[tokio::test]
    async fn test_reader_skips_malformed_and_relays_rest() {
        // テスト項目: 不正な JSON・未知の kind は破棄され、後続の正しいフレームは中継される
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let alice = registered(&registry).await;
        let mut publisher = MockEnvelopePublisher::new();
        publisher
            .expect_publish()
            .withf(|envelope| {
                matches!(envelope, Envelope::Message(message) if message.content.as_str() == "hi")
            })
            .times(1)
            .returning(|_| Ok(()));
        let relay = RelayEnvelopeUseCase::new(
            registry,
            Arc::new(publisher),
            Arc::new(FixedClock::from_unix_millis(0)),
        );
        let frames = stream::iter(vec![
            text("not json"),
            text(r#"{"kind":"shout","content":"HI"}"#),
            text(r#"{"kind":"message","content":"hi"}"#),
        ]);

        // when (操作):
        reader_loop(frames, &alice.id, &relay).await;

        // then (期待する結果): MockEnvelopePublisher の times(1) で検証
    }

    #[tokio::test]
    async fn test_reader_stops_on_close_and_error() {
        // テスト項目: Close フレーム・読み取りエラー以降のフレームは処理されない
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let alice = registered(&registry).await;
        let mut publisher = MockEnvelopePublisher::new();
        publisher.expect_publish().never();
        let relay = RelayEnvelopeUseCase::new(
            registry,
            Arc::new(publisher),
            Arc::new(FixedClock::from_unix_millis(0)),
        );

        // when (操作):
        reader_loop(
            stream::iter(vec![Ok(Message::Close(None)), text(r#"{"content":"late"}"#)]),
            &alice.id,
            &relay,
        )
        .await;
        reader_loop(
            stream::iter(vec![
                Err(io::Error::other("connection reset")),
                text(r#"{"content":"late"}"#),
            ]),
            &alice.id,
            &relay,
        )
        .await;

        // then (期待する結果): publish は一度も呼ばれない
    }

    #[tokio::test]
    async fn test_reader_ignores_binary_frames() {
        // テスト項目: バイナリフレームは破棄され、後続のテキストフレームは中継される
        // given (前提条件):
        let registry = Arc::new(InMemoryClientRegistry::new());
        let alice = registered(&registry).await;
        let mut publisher = MockEnvelopePublisher::new();
        publisher.expect_publish().times(1).returning(|_| Ok(()));
        let relay = RelayEnvelopeUseCase::new(
            registry,
            Arc::new(publisher),
            Arc::new(FixedClock::from_unix_millis(0)),
        );
        let frames = stream::iter(vec![
            Ok(Message::Binary(vec![0xde, 0xad].into())),
            text(r#"{"content":"after binary"}"#),
        ]);

        // when (操作):
        reader_loop(frames, &alice.id, &relay).await;

        // then (期待する結果): MockEnvelopePublisher の times(1) で検証
    }

    #[tokio::test]
    async fn test_pusher_survives_write_timeout() {
        // テスト項目: 書き込みがタイムアウトしてもタスクは継続し、次のフレームの書き込みを試みる
        // given (前提条件): flush が永遠に終わらないソケット
        let attempts = Arc::new(AtomicUsize::new(0));
        let socket = StalledSocket {
            attempts: attempts.clone(),
        };
        let (tx, rx) = mpsc::channel(8);
        let handle = pusher_loop(rx, socket, Duration::from_millis(20), "alice".to_string());

        // when (操作):
        tx.send("one".to_string()).await.unwrap();
        tx.send("two".to_string()).await.unwrap();

        // then (期待する結果):
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while attempts.load(Ordering::SeqCst) < 2 {
            assert!(tokio::time::Instant::now() < deadline, "second frame was never attempted");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!handle.is_finished());
        handle.abort();
    }

    #[tokio::test]
    async fn test_pusher_writes_in_queue_order() {
        // テスト項目: 送信キューのフレームが順序どおりにソケットへ書き込まれる
        // given (前提条件):
        let (tx, rx) = mpsc::channel(8);
        let (written_tx, mut written_rx) = mpsc::unbounded_channel::<Message>();
        let socket = Box::pin(sink::unfold(written_tx, |written, msg: Message| async move {
            written
                .send(msg)
                .map_err(|_| io::Error::other("receiver dropped"))?;
            Ok::<_, io::Error>(written)
        }));
        let handle = pusher_loop(rx, socket, Duration::from_secs(1), "alice".to_string());

        // when (操作):
        for frame in ["one", "two", "three"] {
            tx.send(frame.to_string()).await.unwrap();
        }
        drop(tx);
        handle.await.unwrap();

        // then (期待する結果):
        let mut written = Vec::new();
        while let Ok(Message::Text(text)) = written_rx.try_recv() {
            written.push(text.to_string());
        }
        assert_eq!(written, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_pusher_stops_on_write_error() {
        // テスト項目: 書き込みエラーでライタータスクが終了する
        // given (前提条件):
        let (tx, rx) = mpsc::channel(8);
        let socket = Box::pin(sink::unfold((), |(), _msg: Message| async move {
            Err::<(), _>(io::Error::other("broken pipe"))
        }));
        let handle = pusher_loop(rx, socket, Duration::from_secs(1), "alice".to_string());

        // when (操作):
        tx.send("one".to_string()).await.unwrap();

        // then (期待する結果): キューが開いたままでもタスクは終了する
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(tx.is_closed());
    }
}
