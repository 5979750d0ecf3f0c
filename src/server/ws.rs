// WebSocket endpoints: streamed chat and push notifications

use super::routes::AppState;
use crate::chat::ChatSession;
use crate::ws::ConnectionHandle;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{debug, warn};

pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| chat_loop(socket, user_id, state))
}

/// Per-connection chat loop.
///
/// The socket is split: a writer task drains registry-pushed messages into
/// the sink, while this loop reads user messages and runs streamed turns.
/// Any exit path unregisters the connection and stops the writer.
async fn chat_loop(socket: WebSocket, user_id: i64, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (handle, mut outbound) = ConnectionHandle::new();
    let connection_id = handle.id;
    state.registry.register(user_id, handle).await;
    debug!("Chat connection {} opened for user {}", connection_id, user_id);

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if sink.send(Message::Text(message)).await.is_err() {
                break;
            }
        }
    });

    let mut session = ChatSession::new();
    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => {
                if let Err(e) = session
                    .run_turn(&state.gateway, &state.registry, user_id, &text)
                    .await
                {
                    warn!("Chat turn for user {} failed: {}", user_id, e);
                    let notice = json!({
                        "type": "error",
                        "message": "The assistant is unavailable right now. Please try again."
                    })
                    .to_string();
                    state.registry.send_to_user(user_id, &notice).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.registry.unregister(user_id, connection_id).await;
    writer.abort();
    debug!("Chat connection {} closed for user {}", connection_id, user_id);
}

pub async fn notifications_ws_handler(
    ws: WebSocketUpgrade,
    Path(user_id): Path<i64>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| notifications_loop(socket, user_id, state))
}

/// Notification connections are push-only: inbound frames are heartbeats and
/// are discarded.
async fn notifications_loop(socket: WebSocket, user_id: i64, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (handle, mut outbound) = ConnectionHandle::new();
    let connection_id = handle.id;
    state.registry.register(user_id, handle).await;

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if sink.send(Message::Text(message)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        if let Message::Close(_) = message {
            break;
        }
    }

    state.registry.unregister(user_id, connection_id).await;
    writer.abort();
}
