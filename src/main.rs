// Define modules
mod clock;      // Resolve "now" in the configured timezone
mod commands;   // Command table + dispatcher (today, week, month, year)
mod dot_matrix; // Per-day statuses for the annual dot card
mod error;      // Command / render errors
mod host;       // Injected capabilities: logging, settings, reply sink
mod logic;      // Core progress calculation
mod models;     // Data structures (ClockReading, ProgressResult, Settings, etc.)
mod render;     // Renderer seam + JSON card payload
mod routes_progress; // HTTP handlers for cards and commands
mod routes_settings; // HTTP handlers for settings
mod state;      // Shared handler state
mod store;      // Persistent config (load/save config.json)

use axum::{
    routing::{get, post}, // HTTP method helpers
    Router, // Main router type
};
use std::net::SocketAddr;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = match store::load_settings() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("failed to load {}, using defaults: {e}", store::CONFIG_PATH);
            models::Settings::default()
        }
    };

    let addr: SocketAddr = match settings.bind_addr.parse() {
        Ok(a) => a,
        Err(e) => {
            log::error!("invalid bind_addr {:?}: {e}", settings.bind_addr);
            return;
        }
    };

    log::info!("time progress plugin loaded (timezone {})", settings.timezone);
    let state = AppState::new(settings, std::path::PathBuf::from(store::CONFIG_PATH));

    let api = Router::new()
        // cards
        .route("/progress/:period", get(routes_progress::get_progress))
        .route("/command", post(routes_progress::post_command))
        // settings
        .route("/settings", get(routes_settings::get_settings).put(routes_settings::put_settings));

    let app = Router::new().nest("/api", api).with_state(state);

    // Print the link to the server
    log::info!("Server running at http://{}", addr);
    log::info!("API base:     http://{}/api", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("bind failed: {e}");
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {e}");
    }
}
