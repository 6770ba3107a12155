//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::net::SocketAddr;

/// Default bind address when neither `--bind` nor `SERVER_BIND` is given
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 3000);

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Shared admin secret (required)
    pub admin_password: String,
    /// Prometheus exporter address, disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Per-session inbound message limits
    pub rate_limits: RateLimitConfig,
    /// Capacity of each session's reply queue; snapshots never queue
    pub session_buffer: usize,
    /// Capacity of the tournament actor inbox
    pub inbox_capacity: usize,
}

/// Inbound websocket message limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Messages allowed per second
    pub burst: usize,
    /// Messages allowed per minute
    pub sustained: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            burst: 10,
            sustained: 100,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `admin_password_override` - Optional admin secret override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if `ADMIN_PASSWORD` is missing or an address is unparsable
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        admin_password_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_addr_env("SERVER_BIND")?.unwrap_or(DEFAULT_BIND),
        };

        let admin_password = admin_password_override
            .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "ADMIN_PASSWORD".to_string(),
                hint: "Pass --admin-password or set it in .env".to_string(),
            })?;

        let metrics_bind = parse_addr_env("METRICS_BIND")?;

        let rate_limits = RateLimitConfig {
            burst: parse_env_or("WS_BURST_LIMIT", 10),
            sustained: parse_env_or("WS_SUSTAINED_LIMIT", 100),
        };

        Ok(ServerConfig {
            bind,
            admin_password,
            metrics_bind,
            rate_limits,
            session_buffer: parse_env_or("SESSION_BUFFER", 32),
            inbox_capacity: parse_env_or("INBOX_CAPACITY", 256),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin_password.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "ADMIN_PASSWORD".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.rate_limits.burst == 0 {
            return Err(ConfigError::Invalid {
                var: "WS_BURST_LIMIT".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.rate_limits.sustained < self.rate_limits.burst {
            return Err(ConfigError::Invalid {
                var: "WS_SUSTAINED_LIMIT".to_string(),
                reason: format!(
                    "Must be at least the burst limit ({})",
                    self.rate_limits.burst
                ),
            });
        }

        if self.session_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_BUFFER".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Invalid {
                var: "INBOX_CAPACITY".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Must differ from the server address ({})", self.bind),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Unset is fine, garbage is not.
fn parse_addr_env(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("{value:?} is not an IP:PORT address ({e})"),
            }),
        Err(_) => Ok(None),
    }
}
