//! Ride booking intake service library.

pub mod booking;
pub mod captcha;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod security;
pub mod store;

pub use booking::BookingService;
pub use config::BookingConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
