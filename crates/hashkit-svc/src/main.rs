//! `hashkit-svc` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Move the configured secrets into [`ServiceKeys`].
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod keys;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::info;

use config::Config;
use keys::ServiceKeys;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_logging(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        hash_algorithm = %cfg.hash_algorithm,
        "hashkit-svc starting"
    );

    // -----------------------------------------------------------------------
    // 3. Keys
    // -----------------------------------------------------------------------
    let keys = ServiceKeys::from_config(&cfg)?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(keys, cfg.hash_algorithm);
    let router = server::router::build(state, cfg.request_timeout());

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
