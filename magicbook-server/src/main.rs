//! Magicbook HTTP server.
//!
//! Env-driven configuration:
//!
//! - `BIND_ADDR` — listen address (default `0.0.0.0:3000`)
//! - `BASE_URL` — public base URL used in magic links
//! - `REDIRECT_URL` — destination successful redirects point at
//! - `ERROR_URL` — destination for not-found/expired redirects (optional)
//! - `DATABASE_URL` — PostgreSQL connection string (`postgres` feature)
//! - `RUST_LOG` — tracing filter (default `info`)
//!
//! Without the `postgres` feature the server runs on the in-memory store,
//! which is only useful for local development.

use axum::Router;
use magicbook::providers::{ConsoleNotifier, SystemClock};
use magicbook::{booking_router, BookingConfig, Environment};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_config() -> BookingConfig {
    let base_url = env_or("BASE_URL", "http://localhost:3000");
    let redirect_url = env_or("REDIRECT_URL", &format!("{base_url}/booking"));
    let config = BookingConfig::new(base_url, redirect_url);

    match std::env::var("ERROR_URL") {
        Ok(error_url) => config.with_error_url(error_url),
        Err(_) => config,
    }
}

#[cfg(feature = "postgres")]
async fn build_router(config: BookingConfig) -> anyhow::Result<Router> {
    use magicbook::stores::PostgresStore;

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set with the postgres feature"))?;
    let store = PostgresStore::connect(&database_url).await?;

    let env = Arc::new(Environment::new(
        store.clone(),
        store,
        ConsoleNotifier::new(),
        SystemClock,
        config,
    ));
    Ok(booking_router(env))
}

#[cfg(not(feature = "postgres"))]
async fn build_router(config: BookingConfig) -> anyhow::Result<Router> {
    use magicbook::mocks::{MockAnalyticsStore, MockBookingStore};

    info!("No postgres feature enabled; using the in-memory store");
    let env = Arc::new(Environment::new(
        MockBookingStore::new(),
        MockAnalyticsStore::new(),
        ConsoleNotifier::new(),
        SystemClock,
        config,
    ));
    Ok(booking_router(env))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    info!(base_url = %config.base_url, "Starting magicbook server");

    let app = build_router(config)
        .await?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let bind_addr = env_or("BIND_ADDR", "0.0.0.0:3000");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
