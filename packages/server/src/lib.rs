#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the wildfire risk backend.
//!
//! Serves weather-driven spread projections, what-if wildfire footprints,
//! sector wedges and site triage under `/api`. Weather is resolved
//! through the configured provider tiers and falls back to a fixed demo
//! record, so every spread request answers even when the network is down.

mod backtest;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use wildfire_risk_weather::{ResolverOptions, WeatherResolver, service_registry};

/// Shared application state.
pub struct AppState {
    /// Weather provider tiers used by the spread endpoints.
    pub weather: Arc<WeatherResolver>,
}

/// Registers every `/api` route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/spread", web::get().to(handlers::spread))
            .route("/spread/wildfire", web::get().to(handlers::wildfire))
            .route("/spread/sectors", web::get().to(handlers::sectors))
            .route("/triage", web::get().to(handlers::triage))
            .route("/validate/spread", web::get().to(handlers::validate_spread))
            .route("/backtest", web::get().to(handlers::backtest)),
    );
}

/// Starts the wildfire risk API server.
///
/// Builds the weather resolver from the enabled service configurations
/// and the `WEATHER_*` environment switches, then binds to `BIND_ADDR`
/// (default `127.0.0.1`) on `PORT` (default `8080`). The caller provides
/// the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if an HTTP client for a weather
/// provider cannot be built, or if the server fails to bind or encounters
/// a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let services = service_registry::enabled_services();
    log::info!("Loading {} weather service(s)...", services.len());
    let resolver = WeatherResolver::from_services(&services, ResolverOptions::from_env())
        .map_err(std::io::Error::other)?;

    if resolver.tier_count() == 0 {
        log::warn!("No weather tiers configured; every spread request uses the demo fallback");
    }

    let state = web::Data::new(AppState {
        weather: Arc::new(resolver),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
