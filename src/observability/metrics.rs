//! Metrics collection and exposition.
//!
//! # Metrics
//! - `booking_requests_total` (counter): submissions by outcome
//! - `booking_request_duration_seconds` (histogram): pipeline latency
//! - `booking_rate_limited_total` (counter): attempts rejected by the rate limiter
//! - `booking_notify_failures_total` (counter): operator emails that failed to send
//! - `booking_request_timeouts_total` (counter): requests cut off by the request deadline

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);

    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Record a finished submission. `outcome` is "accepted" or an error label.
pub fn record_booking(outcome: &'static str, start: Instant) {
    counter!("booking_requests_total", "outcome" => outcome).increment(1);
    histogram!("booking_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    counter!("booking_rate_limited_total").increment(1);
}

pub fn record_notify_failure() {
    counter!("booking_notify_failures_total").increment(1);
}

pub fn record_booking_timeout() {
    counter!("booking_request_timeouts_total").increment(1);
}
