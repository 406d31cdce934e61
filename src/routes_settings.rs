// --------------------------------------------------
// Handles API endpoints for the runtime settings
// (timezone, debug logging, bind address).
// --------------------------------------------------

use std::net::SocketAddr;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::host::Host;
use crate::models::Settings;
use crate::state::SharedState;
use crate::store;

// -----------------------------
// GET /api/settings
// -----------------------------
pub async fn get_settings(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.settings())
}

// -----------------------------
// PUT /api/settings
// Validates, then persists and swaps the live settings under one write lock
// so the file and memory never disagree
// -----------------------------
pub async fn put_settings(
    State(state): State<SharedState>,
    Json(s): Json<Settings>,
) -> impl IntoResponse {
    if let Err(e) = s.timezone.parse::<chrono_tz::Tz>() {
        return (StatusCode::BAD_REQUEST, format!("invalid timezone: {e}")).into_response();
    }
    if let Err(e) = s.bind_addr.parse::<SocketAddr>() {
        return (StatusCode::BAD_REQUEST, format!("invalid bind_addr: {e}")).into_response();
    }

    let mut live = match state.settings.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Err(e) = store::save_settings_to(&state.config_path, &s) {
        log::error!("failed to save settings: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save settings").into_response();
    }

    *live = s.clone();
    drop(live);
    log::info!("settings updated: timezone={} debug_time={}", s.timezone, s.debug_time);

    Json(s).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::state::AppState;

    fn scratch_state(name: &str) -> (SharedState, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("timeprogress-{name}-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.json");
        (AppState::new(Settings::default(), path.clone()), path)
    }

    async fn put(state: SharedState, s: Settings) -> StatusCode {
        put_settings(State(state), Json(s)).await.into_response().status()
    }

    #[tokio::test]
    async fn valid_settings_are_saved_and_applied() {
        let (state, path) = scratch_state("put-ok");
        let s = Settings { timezone: "Europe/Paris".to_string(), ..Settings::default() };
        assert_eq!(put(state.clone(), s).await, StatusCode::OK);

        assert_eq!(state.settings().timezone, "Europe/Paris");
        assert_eq!(store::load_settings_from(&path).unwrap().timezone, "Europe/Paris");
        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn invalid_timezone_is_400_and_not_saved() {
        let (state, path) = scratch_state("put-tz");
        let s = Settings { timezone: "Nowhere/Special".to_string(), ..Settings::default() };
        assert_eq!(put(state.clone(), s).await, StatusCode::BAD_REQUEST);

        assert!(!path.exists());
        assert_eq!(state.settings().timezone, "Asia/Shanghai");
    }

    #[tokio::test]
    async fn invalid_bind_addr_is_400_and_not_saved() {
        let (state, path) = scratch_state("put-addr");
        let s = Settings { bind_addr: "not an address".to_string(), ..Settings::default() };
        assert_eq!(put(state.clone(), s).await, StatusCode::BAD_REQUEST);

        assert!(!path.exists());
        assert_eq!(state.settings().bind_addr, "127.0.0.1:3000");
    }
}
