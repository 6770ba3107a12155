//! Realtime server for a group round-robin tournament.
//!
//! Hosts one [`group_tourney`] actor behind an axum websocket endpoint.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
