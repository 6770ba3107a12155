//! Group tournament server.
//!
//! Spawns a single TournamentActor and serves its sync protocol over
//! websockets.

use anyhow::Error;
use gt_server::{
    api,
    config::ServerConfig,
    logging, metrics,
};
use group_tourney::sync::{TournamentActor, TournamentConfig};
use log::{info, warn};
use pico_args::Arguments;
use std::net::SocketAddr;

const HELP: &str = "\
Run a group round-robin tournament server

USAGE:
  gt_server [OPTIONS]

OPTIONS:
  --bind            IP:PORT   Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:3000]
  --admin-password  SECRET    Shared admin password       [default: env ADMIN_PASSWORD]

FLAGS:
  -h, --help                  Print help information

ENVIRONMENT:
  SERVER_BIND                 Server bind address (e.g., 0.0.0.0:8080)
  ADMIN_PASSWORD              Shared admin password (required)
  METRICS_BIND                Prometheus exporter address (optional)
  WS_BURST_LIMIT              Messages per second per session   [default: 10]
  WS_SUSTAINED_LIMIT          Messages per minute per session   [default: 100]
  SESSION_BUFFER              Reply queue per session           [default: 32]
  INBOX_CAPACITY              Tournament actor inbox capacity   [default: 256]
  RUST_LOG                    Log filter                        [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let admin_password: Option<String> = pargs.opt_value_from_str("--admin-password")?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}\n\n{HELP}");
    }

    logging::init();

    let config = ServerConfig::from_env(bind, admin_password)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus metrics exported at http://{}/metrics", addr);
    }

    let (actor, handle) = TournamentActor::new(TournamentConfig {
        admin_password: config.admin_password.clone(),
        inbox_capacity: config.inbox_capacity,
    });
    tokio::spawn(actor.run());

    let app = api::create_router(api::AppState::new(
        handle,
        config.rate_limits,
        config.session_buffer,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{} (websocket at /ws). Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
