#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the `WildGuard` poaching-risk service.
//!
//! Serves the REST API for wildlife telemetry analysis: movement anomaly
//! detection, camera-trap image analysis, composite risk scoring, ranger
//! briefing generation, and a full-pipeline orchestration endpoint. The two
//! reference datasets (simulated tracks and poaching hotspots) are loaded
//! once at startup and shared immutably across requests; the LLM agent
//! suite is selected once at startup from available credentials.

mod handlers;
pub mod fixtures;
pub mod pipeline;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use std::path::Path;
use wildguard_ai::agents::AgentSuite;
use wildguard_wildlife_models::{HotspotSet, TrackRecord};

/// Maximum accepted request payload, matching the original 16 MiB upload cap.
const MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state. Immutable after startup; no locking needed.
pub struct AppState {
    /// The wildlife track fixture.
    pub tracks: Vec<TrackRecord>,
    /// The poaching hotspot fixture.
    pub hotspots: HotspotSet,
    /// The enrichment agent suite, or `None` when explicitly disabled via
    /// `AI_AGENTS=off`.
    pub agents: Option<AgentSuite>,
}

/// Starts the `WildGuard` API server.
///
/// Loads the two JSON fixtures (paths overridable via `TRACKS_PATH` and
/// `HOTSPOTS_PATH`), builds the agent suite from available credentials
/// (`GROQ_API_KEY` selects the live provider, otherwise simulated;
/// `AI_AGENTS=off` disables the suite entirely), and starts the Actix-Web
/// HTTP server. This is a regular async function — the caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if either fixture file cannot be read or parsed.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Loading reference datasets...");
    let tracks_path =
        std::env::var("TRACKS_PATH").unwrap_or_else(|_| fixtures::DEFAULT_TRACKS_PATH.to_string());
    let hotspots_path = std::env::var("HOTSPOTS_PATH")
        .unwrap_or_else(|_| fixtures::DEFAULT_HOTSPOTS_PATH.to_string());

    let tracks =
        fixtures::load_tracks(Path::new(&tracks_path)).expect("Failed to load track fixture");
    let hotspots = fixtures::load_hotspots(Path::new(&hotspots_path))
        .expect("Failed to load hotspot fixture");

    log::info!(
        "Loaded {} track records and {} hotspots",
        tracks.len(),
        hotspots.hotspots.len()
    );

    let agents = if std::env::var("AI_AGENTS").is_ok_and(|v| v.eq_ignore_ascii_case("off")) {
        log::warn!("AI agents disabled via AI_AGENTS=off");
        None
    } else {
        Some(AgentSuite::from_env())
    };
    if let Some(suite) = &agents {
        log::info!("Agent suite mode: {} ({})", suite.mode(), suite.model());
    }

    let state = web::Data::new(AppState {
        tracks,
        hotspots,
        agents,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .app_data(web::JsonConfig::default().limit(MAX_PAYLOAD_BYTES))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/data", web::get().to(handlers::data))
                    .route("/hotspots", web::get().to(handlers::hotspots))
                    .route("/movement", web::post().to(handlers::movement))
                    .route("/vision", web::post().to(handlers::vision))
                    .route("/score", web::post().to(handlers::score))
                    .route("/report", web::post().to(handlers::report))
                    .route("/orchestrate", web::post().to(handlers::orchestrate))
                    .route("/agents/status", web::get().to(handlers::agents_status))
                    .route("/agents/analyze", web::post().to(handlers::agents_analyze)),
            )
            .default_service(web::route().to(handlers::not_found))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
