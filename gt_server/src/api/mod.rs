//! HTTP/WebSocket API for the tournament server.
//!
//! # Endpoints Overview
//!
//! - `GET /ws` - Websocket sync channel, one session per connection
//! - `GET /health` - Server health status
//!
//! All tournament traffic goes over the websocket. Each frame is a JSON
//! envelope `{"event": "<name>", "data": <payload>}`; see
//! [`group_tourney::sync`] for the event catalogue.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gt_server::{api::{AppState, create_router}, config::RateLimitConfig};
//! use group_tourney::sync::{TournamentActor, TournamentConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (actor, handle) = TournamentActor::new(TournamentConfig {
//!     admin_password: "secret".to_string(),
//!     ..TournamentConfig::default()
//! });
//! tokio::spawn(actor.run());
//!
//! let app = create_router(AppState::new(handle, RateLimitConfig::default(), 32));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively; viewers are served from anywhere.

pub mod rate_limiter;
pub mod websocket;

use crate::config::RateLimitConfig;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};
use group_tourney::sync::TournamentHandle;
use serde_json::json;
use std::sync::{Arc, atomic::AtomicUsize};
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers and WebSocket connections.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the single tournament actor
    pub tournament: TournamentHandle,
    /// Limits applied to every session's inbound frames
    pub rate_limits: RateLimitConfig,
    /// Reply queue capacity per session
    pub session_buffer: usize,
    /// Open websocket count, for the connections gauge
    pub connections: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(
        tournament: TournamentHandle,
        rate_limits: RateLimitConfig,
        session_buffer: usize,
    ) -> Self {
        Self {
            tournament,
            rate_limits,
            session_buffer: session_buffer.max(1),
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }
}

/// Create the API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(websocket::websocket_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` with session and progress counters while the tournament
/// actor is answering, `503 Service Unavailable` once it has stopped.
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","tournament":{"sessions":2,...},"timestamp":"2026-10-19T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match state.tournament.status().await {
        Ok(status) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "tournament": status,
                "timestamp": timestamp,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "version": env!("CARGO_PKG_VERSION"),
                "error": e,
                "timestamp": timestamp,
            })),
        ),
    }
}
