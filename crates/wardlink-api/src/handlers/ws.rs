//! WebSocket upgrade handler and connection loop.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use wardlink_realtime::{ChannelHandle, OutboundEvent};

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    /// Access token.
    pub token: String,
}

/// GET /ws?token={jwt} — WebSocket upgrade
///
/// The token is validated before the upgrade; a bad token rejects the
/// handshake with 401 instead of opening and closing a socket.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let claims = state.token_decoder.decode(&query.token)?;
    let account_id = claims.account_id();

    Ok(ws.on_upgrade(move |socket| handle_connection(state, account_id, socket)))
}

/// Runs an established WebSocket connection until it closes.
async fn handle_connection(state: AppState, account_id: Uuid, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let (tx, mut outbound_rx) = mpsc::channel(state.config.realtime.channel_buffer_size);
    let handle = Arc::new(ChannelHandle::new(account_id, tx));
    let channel_id = handle.id;
    state.registry.register(handle);

    info!(
        channel_id = %channel_id,
        account_id = %account_id,
        "WebSocket connection established"
    );

    // Forward dispatched events onto the socket, interleaved with
    // keepalive pings.
    let ping_interval = Duration::from_secs(state.config.realtime.ping_interval_seconds);
    let outbound_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_interval);
        ticker.tick().await; // skip the immediate first tick
        loop {
            let event = tokio::select! {
                event = outbound_rx.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
                _ = ticker.tick() => OutboundEvent::Ping {
                    timestamp: Utc::now().timestamp(),
                },
            };
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize outbound event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound traffic is ignored apart from close and protocol errors;
    // clients only listen on this socket.
    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(channel_id = %channel_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    state.registry.unregister(&channel_id);

    info!(
        channel_id = %channel_id,
        account_id = %account_id,
        "WebSocket connection closed"
    );
}
