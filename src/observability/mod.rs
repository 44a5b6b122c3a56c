//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request (tower-http span)
//! - Metrics are cheap (atomic increments) and no-ops when no recorder is installed
//! - Secrets never appear in log fields

pub mod logging;
pub mod metrics;
