//! Per-session rate limiting for inbound websocket frames.
//!
//! Each session gets a short burst window and a longer sustained window; a
//! frame must fit in both to be accepted.

use crate::config::RateLimitConfig;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rate limiter using a sliding window algorithm
#[derive(Debug)]
pub struct RateLimiter {
    /// Timestamps of recent requests
    timestamps: VecDeque<Instant>,
    /// Maximum number of requests allowed in the window
    max_requests: usize,
    /// Time window for rate limiting
    window: Duration,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Example
    ///
    /// ```
    /// use gt_server::api::rate_limiter::RateLimiter;
    /// use std::time::Duration;
    ///
    /// let mut limiter = RateLimiter::new(2, Duration::from_secs(1));
    /// assert!(limiter.check());
    /// assert!(limiter.check());
    /// assert!(!limiter.check());
    /// ```
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(max_requests),
            max_requests,
            window,
        }
    }

    /// Check if a request should be allowed, recording it when it is.
    pub fn check(&mut self) -> bool {
        self.check_at(Instant::now())
    }

    fn check_at(&mut self, now: Instant) -> bool {
        self.evict(now);

        if self.timestamps.len() >= self.max_requests {
            return false;
        }

        self.timestamps.push_back(now);
        true
    }

    /// Whether a request at `now` would fit, without recording it.
    fn has_room_at(&mut self, now: Instant) -> bool {
        self.evict(now);
        self.timestamps.len() < self.max_requests
    }

    fn evict(&mut self, now: Instant) {
        while let Some(ts) = self.timestamps.front() {
            if now.duration_since(*ts) >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Number of requests in the current window
    pub fn current_count(&self) -> usize {
        self.timestamps.len()
    }
}

/// Which window rejected a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitExceeded {
    Burst,
    Sustained,
}

impl LimitExceeded {
    pub fn as_str(self) -> &'static str {
        match self {
            LimitExceeded::Burst => "burst",
            LimitExceeded::Sustained => "sustained",
        }
    }

    /// Text sent back to the session in an `errorMsg`.
    pub fn message(self) -> &'static str {
        match self {
            LimitExceeded::Burst => "Rate limit exceeded. Please slow down.",
            LimitExceeded::Sustained => "Too many messages. Please wait before sending more.",
        }
    }
}

/// Burst and sustained windows for one session
#[derive(Debug)]
pub struct SessionLimiter {
    burst: RateLimiter,
    sustained: RateLimiter,
}

impl SessionLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            burst: RateLimiter::new(config.burst, Duration::from_secs(1)),
            sustained: RateLimiter::new(config.sustained, Duration::from_secs(60)),
        }
    }

    /// Admit one frame. A rejected frame is not counted against either window.
    pub fn check(&mut self) -> Result<(), LimitExceeded> {
        let now = Instant::now();
        if !self.sustained.has_room_at(now) {
            return Err(LimitExceeded::Sustained);
        }
        if !self.burst.check_at(now) {
            return Err(LimitExceeded::Burst);
        }
        self.sustained.check_at(now);
        Ok(())
    }
}
