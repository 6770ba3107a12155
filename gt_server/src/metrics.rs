//! Prometheus metrics for the tournament server.
//!
//! Metrics are exposed in Prometheus text format when `METRICS_BIND` is set.
//! Without an installed recorder every call here is a no-op.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use gt_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::websocket_connections_total();
//! metrics::websocket_connections_active(1);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// WebSocket Metrics
// ============================================================================

/// Set current active WebSocket connections count.
pub fn websocket_connections_active(count: usize) {
    metrics::gauge!("websocket_connections_active").set(count as f64);
}

/// Increment total WebSocket connections counter.
pub fn websocket_connections_total() {
    metrics::counter!("websocket_connections_total").increment(1);
}

/// Increment WebSocket messages sent counter, labelled by outbound event.
pub fn websocket_messages_sent(event: &'static str) {
    metrics::counter!("websocket_messages_sent", "event" => event).increment(1);
}

/// Increment WebSocket messages received counter, labelled by inbound event.
pub fn websocket_messages_received(event: &'static str) {
    metrics::counter!("websocket_messages_received", "event" => event).increment(1);
}

/// Frames that were not valid client events.
pub fn websocket_malformed_frames() {
    metrics::counter!("websocket_malformed_frames_total").increment(1);
}

// ============================================================================
// Tournament Metrics
// ============================================================================

/// Increment admin login attempts counter.
pub fn admin_logins_total(success: bool) {
    metrics::counter!("admin_logins_total",
        "success" => success.to_string()
    )
    .increment(1);
}

/// Increment `errorMsg` notices counter (advisory rejections and rate limits).
pub fn error_notices_total() {
    metrics::counter!("error_notices_total").increment(1);
}

// ============================================================================
// Rate Limiting Metrics
// ============================================================================

/// Increment rate limit hits counter.
pub fn rate_limit_hits_total(window: &'static str) {
    metrics::counter!("rate_limit_hits_total", "window" => window).increment(1);
}
