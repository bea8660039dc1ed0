#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the missing child alert platform.
//!
//! Serves the public case reporting and sighting endpoints, the analytics
//! read endpoints (risk zones, demographics, insights), and the engine
//! trigger. The risk zone engine's delete-then-insert replace must never
//! interleave with a second run, so [`AppState`] carries a single-flight
//! lock: a concurrent update request gets HTTP 409 instead of queueing.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use alert_map_database::{db, run_migrations};
use alert_map_notify::AlertChannel;
use switchy_database::Database;

/// Shared application state.
pub struct AppState {
    /// Case store connection.
    pub db: Arc<dyn Database>,
    /// Configured alert channels for new-case fan-out.
    pub alert_channels: Arc<Vec<Box<dyn AlertChannel>>>,
    /// Shared HTTP client for geocoding requests.
    pub http: reqwest::Client,
    /// Nominatim base URL.
    pub geocoder_url: String,
    /// Single-flight guard: at most one risk zone engine run at a time.
    pub engine_lock: Arc<tokio::sync::Mutex<()>>,
}

/// Starts the alert map API server.
///
/// Connects to Postgres, runs migrations, builds the configured alert
/// channels, and serves the REST API. This is a regular async function —
/// the caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the database connection or migrations fail; the server has
/// nothing to serve without its store.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to database");

    log::info!("Running migrations...");
    run_migrations(db_conn.as_ref())
        .await
        .expect("Failed to run migrations");

    let http = reqwest::Client::new();
    let alert_channels = alert_map_notify::channels_from_env(&http);
    log::info!("{} alert channels configured", alert_channels.len());

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
        alert_channels: Arc::new(alert_channels),
        http,
        geocoder_url: alert_map_geocoder::base_url_from_env(),
        engine_lock: Arc::new(tokio::sync::Mutex::new(())),
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
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/cases", web::get().to(handlers::list_cases))
                    .route("/cases", web::post().to(handlers::report_case))
                    .route(
                        "/cases/{report_id}/status",
                        web::patch().to(handlers::update_case_status),
                    )
                    .route("/sightings", web::post().to(handlers::report_sighting))
                    .route(
                        "/analytics/risk-zones",
                        web::get().to(handlers::risk_zones),
                    )
                    .route(
                        "/analytics/risk-zones/update",
                        web::post().to(handlers::update_risk_zones),
                    )
                    .route(
                        "/analytics/demographics",
                        web::get().to(handlers::demographics),
                    )
                    .route("/analytics/insights", web::get().to(handlers::insights)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
