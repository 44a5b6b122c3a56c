//! Per-address sliding-window rate limiting for booking attempts.

use std::collections::VecDeque;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::config::RateLimitConfig;
use crate::http::response::ApiResponse;
use crate::observability::metrics;

pub const RATE_LIMIT_MESSAGE: &str = "Too many booking attempts. Please try again later.";

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Attempt recorded; `remaining` attempts left in the current window.
    Allowed { remaining: u32 },
    /// Window full; the oldest attempt expires after `retry_after`.
    Limited { retry_after: Duration },
}

/// Sliding-window log: each client keeps the instants of its accepted attempts.
/// Rejected attempts are not recorded.
pub struct RateLimiter {
    windows: DashMap<String, VecDeque<Instant>>,
    max_attempts: u32,
    window: Duration,
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_attempts,
            window,
            trust_forwarded_for: false,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        let mut limiter = Self::new(config.max_attempts, Duration::from_secs(config.window_secs));
        limiter.trust_forwarded_for = config.trust_forwarded_for;
        limiter
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut attempts = self.windows.entry(key.to_string()).or_default();
        prune(&mut attempts, now, self.window);

        if attempts.len() >= self.max_attempts as usize {
            let retry_after = attempts
                .front()
                .map(|oldest| (*oldest + self.window).saturating_duration_since(now))
                .unwrap_or(self.window);
            return RateDecision::Limited { retry_after };
        }

        attempts.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_attempts - attempts.len() as u32,
        }
    }

    /// Drop clients whose window has emptied.
    pub fn sweep(&self, now: Instant) {
        self.windows.retain(|_, attempts| {
            prune(attempts, now, self.window);
            !attempts.is_empty()
        });
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Key for the request: first `X-Forwarded-For` hop when trusted, else the peer IP.
    pub fn client_key(&self, headers: &HeaderMap, peer: SocketAddr) -> String {
        if self.trust_forwarded_for {
            if let Some(forwarded) = forwarded_client(headers) {
                return forwarded.to_string();
            }
        }
        peer.ip().to_string()
    }

    /// Periodically sweep idle clients until shutdown.
    pub async fn run_sweeper(self: Arc<Self>, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep(Instant::now());
                    tracing::trace!(clients = self.tracked_clients(), "Rate limiter swept");
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Rate limiter sweeper stopping");
                    break;
                }
            }
        }
    }
}

fn prune(attempts: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = attempts.front() {
        if now.saturating_duration_since(*oldest) >= window {
            attempts.pop_front();
        } else {
            break;
        }
    }
}

fn forwarded_client(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Middleware guarding the booking route.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = limiter.client_key(request.headers(), addr);

    match limiter.check(&key) {
        RateDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert("ratelimit-limit", HeaderValue::from(limiter.max_attempts()));
            headers.insert("ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        RateDecision::Limited { retry_after } => {
            tracing::warn!(client = %key, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            metrics::record_rate_limited();
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ApiResponse::rejected(RATE_LIMIT_MESSAGE)),
            )
                .into_response();
            // Round up so clients never retry a moment too early
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert("retry-after", HeaderValue::from(secs));
            response
        }
    }
}
