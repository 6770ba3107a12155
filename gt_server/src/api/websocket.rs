//! WebSocket handler for the tournament sync channel.
//!
//! # Connection Flow
//!
//! 1. Client connects via `GET /ws`
//! 2. Server assigns a fresh session id and registers it with the actor,
//!    which immediately pushes the current `state`
//! 3. A send task drains the session's replies and newest snapshot onto the
//!    socket while the receive loop rate-limits, parses and forwards client
//!    events
//! 4. On close the send task is aborted and the session (with any admin
//!    privilege) is dropped
//!
//! # Example
//!
//! ```javascript
//! const ws = new WebSocket('ws://localhost:3000/ws');
//!
//! ws.onmessage = (frame) => {
//!   const { event, data } = JSON.parse(frame.data);
//!   if (event === 'state') render(data);
//! };
//!
//! ws.send(JSON.stringify({ event: 'loginAdmin', data: 'secret' }));
//! ws.send(JSON.stringify({ event: 'setMatchWinner', data: { matchId: 1, winner: 'p1' } }));
//! ```

use super::{AppState, rate_limiter::SessionLimiter};
use crate::{logging, metrics};
use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use group_tourney::sync::{ClientEvent, ServerEvent, SessionId, session_channel};
use log::{debug, error, info, warn};
use std::{sync::atomic::Ordering, time::Instant};
use uuid::Uuid;

/// Upgrade an HTTP connection to a tournament session.
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    let (outbound, mut inbound) = session_channel(state.session_buffer);
    let notices = outbound.notices();

    if state.tournament.connect(session_id, outbound).await.is_err() {
        error!("Tournament unavailable, closing session {}", session_id);
        return;
    }

    let active = state.connections.fetch_add(1, Ordering::Relaxed) + 1;
    metrics::websocket_connections_total();
    metrics::websocket_connections_active(active);
    info!("WebSocket connected: session={}", session_id);

    let send_task = tokio::spawn(async move {
        while let Some(event) = inbound.recv().await {
            record_outbound(session_id, &event);

            let start = Instant::now();
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize {}: {}", event.name(), e);
                    continue;
                }
            };
            logging::log_performance(
                "serialize_event",
                start.elapsed().as_micros() as u64,
                Some(event.name()),
            );

            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut limiter = SessionLimiter::new(state.rate_limits);

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Err(limit) = limiter.check() {
                    metrics::rate_limit_hits_total(limit.as_str());
                    logging::log_security_event(
                        "rate_limited",
                        Some(session_id.to_string().as_str()),
                        limit.message(),
                    );
                    let _ = notices.try_send(ServerEvent::ErrorMsg {
                        msg: limit.message().to_string(),
                    });
                    continue;
                }

                let event = match serde_json::from_str::<ClientEvent>(text.as_str()) {
                    Ok(event) => event,
                    Err(e) => {
                        metrics::websocket_malformed_frames();
                        warn!("Ignoring malformed frame from session {}: {}", session_id, e);
                        continue;
                    }
                };

                // Payloads are not logged; loginAdmin carries the secret
                metrics::websocket_messages_received(event.name());
                debug!("Session {} sent {}", session_id, event.name());

                if state.tournament.dispatch(session_id, event).await.is_err() {
                    error!("Tournament closed, ending session {}", session_id);
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                info!("WebSocket closed by client: session={}", session_id);
                break;
            }
            Err(e) => {
                warn!("WebSocket error on session {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    send_task.abort();
    let _ = state.tournament.disconnect(session_id).await;

    let active = state
        .connections
        .fetch_sub(1, Ordering::Relaxed)
        .saturating_sub(1);
    metrics::websocket_connections_active(active);
    info!("WebSocket disconnected: session={}", session_id);
}

fn record_outbound(session_id: SessionId, event: &ServerEvent) {
    metrics::websocket_messages_sent(event.name());

    match event {
        ServerEvent::AdminStatus { ok } => {
            metrics::admin_logins_total(*ok);
            if !ok {
                logging::log_security_event(
                    "failed_admin_login",
                    Some(session_id.to_string().as_str()),
                    "Admin password rejected",
                );
            }
        }
        ServerEvent::ErrorMsg { .. } => metrics::error_notices_total(),
        ServerEvent::State(_) => {}
    }
}
