//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    infrastructure::dto::websocket::{ServerMessageType, WelcomeMessage},
    ui::state::AppState,
    usecase::JoinedSession,
};

use super::session::{ClientCommand, Session};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Requested room identifier; malformed or absent values resolve to the
    /// global room
    pub room: Option<String>,
    /// Optional display name
    pub name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // Room resolution never fails, so every connection is upgraded
    ws.on_upgrade(move |socket| handle_socket(socket, state, query))
}

fn welcome_message(joined: &JoinedSession) -> WelcomeMessage {
    WelcomeMessage {
        r#type: ServerMessageType::Welcome,
        user_id: joined.participant_id.as_str().to_string(),
        room_id: joined.room_code.as_str().to_string(),
        room_name: joined.room_name.as_str().to_string(),
        boredom: joined.boredom.rounded(),
        average: joined.stats.average,
        count: joined.stats.count,
        individuals: joined
            .stats
            .individuals
            .iter()
            .cloned()
            .map(Into::into)
            .collect(),
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, query: ConnectQuery) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive broadcasts
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = Session::new();

    // Resolve the room, mint a participant id, register the channel
    let joined = match state
        .join_room_usecase
        .execute(query.room.as_deref(), query.name.as_deref(), tx)
        .await
    {
        Ok(joined) => joined,
        Err(e) => {
            tracing::warn!("Join failed, closing connection: {}", e);
            return;
        }
    };
    session.join(joined.session_key());

    // Send the one-time welcome to this connection only
    let welcome_json = serde_json::to_string(&welcome_message(&joined)).unwrap();
    if let Err(e) = sender.send(Message::Text(welcome_json.into())).await {
        tracing::error!(
            "Failed to send welcome to '{}': {}",
            joined.participant_id,
            e
        );
        close_session(&state, &mut session).await;
        return;
    }

    // Room-wide broadcast so existing participants see the updated count
    state
        .broadcast_stats_usecase
        .execute(&joined.room_code)
        .await;

    // Single event loop: each arm runs to completion before the next event
    // is taken, so no mutation ever observes a half-applied step.
    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(payload) => {
                        if sender.send(Message::Text(payload.into())).await.is_err() {
                            break;
                        }
                    }
                    // Channel closed: unregistered or server shutdown
                    None => break,
                }
            }
            inbound = receiver.next() => {
                let Some(frame) = inbound else { break };
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!(
                            "WebSocket error for '{}': {}",
                            joined.participant_id,
                            e
                        );
                        break;
                    }
                };

                match frame {
                    Message::Text(text) => {
                        handle_text(&state, &session, &text).await;
                    }
                    Message::Close(_) => {
                        tracing::info!(
                            "Participant '{}' requested close",
                            joined.participant_id
                        );
                        break;
                    }
                    Message::Ping(_) => {
                        tracing::debug!("Received ping");
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                    _ => {}
                }
            }
        }
    }

    close_session(&state, &mut session).await;
}

/// Classify and apply one inbound text frame. Unrecognized payloads are
/// dropped without a response and without closing the connection.
async fn handle_text(state: &Arc<AppState>, session: &Session, text: &str) {
    let Some(key) = session.key() else { return };

    match session.command_for(text) {
        Some(ClientCommand::SetBoredom(raw)) => {
            if state.update_boredom_usecase.execute(key, raw).await {
                state.broadcast_stats_usecase.execute(&key.room).await;
            }
        }
        Some(ClientCommand::SetName(name)) => {
            if state.rename_participant_usecase.execute(key, &name).await {
                state.broadcast_stats_usecase.execute(&key.room).await;
            }
        }
        None => {
            tracing::debug!("Dropped unrecognized message: {}", text);
        }
    }
}

/// Idempotent close path: the first call removes the participant entry and
/// broadcasts the shrunken stats, later calls are no-ops.
async fn close_session(state: &Arc<AppState>, session: &mut Session) {
    if let Some(key) = session.close() {
        state.leave_room_usecase.execute(&key).await;
        state.broadcast_stats_usecase.execute(&key.room).await;
    }
}
