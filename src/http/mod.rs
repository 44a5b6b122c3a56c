//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → security::rate_limit (booking route only)
//!     → handlers.rs (JSON body → BookingService)
//!     → response.rs (success/failure envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiResponse;
pub use server::{build_router, AppState, HttpServer};
