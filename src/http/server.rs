//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the booking route
//! - Wire up middleware (request ID, tracing, body limit, timeout, CORS)
//! - Attach the rate limiter to the booking route
//! - Bind server to listener and shut down gracefully

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, middleware, routing::post, Router};
use tokio::net::TcpListener;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::booking::BookingService;
use crate::config::BookingConfig;
use crate::http::handlers::{self, request_failed};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::Shutdown;
use crate::security::{rate_limit_middleware, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
}

/// HTTP server for the booking service.
pub struct HttpServer {
    router: Router,
    config: BookingConfig,
    limiter: Option<Arc<RateLimiter>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and pipeline.
    pub fn new(config: BookingConfig, service: BookingService) -> Self {
        let limiter = config
            .rate_limit
            .enabled
            .then(|| Arc::new(RateLimiter::from_config(&config.rate_limit)));

        let state = AppState {
            service: Arc::new(service),
        };

        let router = build_router(&config, state, limiter.clone());
        Self {
            router,
            config,
            limiter,
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        if let Some(limiter) = &self.limiter {
            let interval = Duration::from_secs(self.config.rate_limit.sweep_interval_secs);
            tokio::spawn(limiter.clone().run_sweeper(interval, shutdown.subscribe()));
        }

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
///
/// The body limit sits outside the timeout; a request that outlives
/// `timeouts.request_secs` is answered by `request_failed`.
pub fn build_router(
    config: &BookingConfig,
    state: AppState,
    limiter: Option<Arc<RateLimiter>>,
) -> Router {
    let book = match limiter {
        Some(limiter) => {
            post(handlers::book).layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
        }
        None => post(handlers::book),
    };

    let router = Router::new()
        .route("/api/book", book)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(propagate_request_id_layer())
                .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                .layer(HandleErrorLayer::new(request_failed))
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
        );

    if config.security.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
