//! Structured logging configuration.
//!
//! The library logs through the `log` facade; the subscriber installed here
//! bridges those records into `tracing` alongside the server's own spans.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG`, defaulting to `info` with transport
/// crates quietened.
///
/// # Example
///
/// ```no_run
/// use gt_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("Server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log security event with structured data
///
/// # Arguments
///
/// * `event_type` - Type of security event
/// * `session_id` - Optional websocket session
/// * `message` - Event message
///
/// # Example
///
/// ```
/// use gt_server::logging::log_security_event;
///
/// log_security_event("failed_admin_login", None, "Wrong password");
/// ```
pub fn log_security_event(event_type: &str, session_id: Option<&str>, message: &str) {
    tracing::warn!(
        event_type = event_type,
        session_id = session_id,
        "SECURITY: {}",
        message
    );
}

/// Log performance metric
///
/// Anything over 100ms is reported as slow.
pub fn log_performance(operation: &str, duration_us: u64, metadata: Option<&str>) {
    if duration_us > 100_000 {
        tracing::warn!(
            operation = operation,
            duration_us = duration_us,
            metadata = metadata,
            "PERFORMANCE: Slow operation"
        );
    } else {
        tracing::trace!(
            operation = operation,
            duration_us = duration_us,
            metadata = metadata,
            "Performance metric"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_security_event() {
        // Just ensure it doesn't panic
        log_security_event("failed_admin_login", Some("abc"), "Test message");
        log_security_event("rate_limited", None, "Test message");
    }

    #[test]
    fn test_log_performance() {
        log_performance("serialize_state", 500, Some("metadata"));
        log_performance("serialize_state", 200_000, None);
    }
}
