//! Ride booking intake service.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/book
//!        │
//!        ▼
//!   ┌───────────────────────────── http ─────────────────────────────┐
//!   │ request id → trace → timeout → body limit → rate limit (/IP)  │
//!   └───────────────────────────────┬────────────────────────────────┘
//!                                   ▼
//!   ┌──────────────────────── BookingService ────────────────────────┐
//!   │ token? → captcha verify → fields → mobile → outstation rule   │
//!   │        → store.insert (MongoDB) → notifier (SMTP) → receipt   │
//!   └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from an optional TOML file plus the environment
//! (`MONGO_URI`, `EMAIL_USER`, `EMAIL_PASS`, `RECAPTCHA_SECRET`, `.env` honoured).

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use ride_booking::config::load_config;
use ride_booking::http::HttpServer;
use ride_booking::lifecycle::{build_service, wait_for_shutdown_signal, Shutdown};
use ride_booking::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ride-booking")]
#[command(about = "Ride booking intake service", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env is normal in production
    let _ = dotenvy::dotenv();

    let config = load_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("ride-booking v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rate_limit_enabled = config.rate_limit.enabled,
        max_attempts = config.rate_limit.max_attempts,
        window_secs = config.rate_limit.window_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = build_service(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config, service);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
