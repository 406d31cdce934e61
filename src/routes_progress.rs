use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::commands;
use crate::host::{CollectedReplies, Reply};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub start: Option<String>, // "HH:MM", today only
    pub end: Option<String>,   // "HH:MM", today only
    pub style: Option<String>, // "0" | "1", year only
}

impl ProgressQuery {
    // Same positional arguments the chat command would receive
    fn args(&self) -> Vec<&str> {
        [&self.start, &self.end, &self.style]
            .into_iter()
            .filter_map(|a| a.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandInput {
    pub text: String, // "/today 14:00 21:00"
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub replies: Vec<Reply>,
}

// -----------------------------
// GET /api/progress/:period
// Returns one rendered card (today / week / month / year)
// -----------------------------
pub async fn get_progress(
    State(state): State<SharedState>,
    Path(period): Path<String>,
    Query(q): Query<ProgressQuery>,
) -> impl IntoResponse {
    let Some(command) = commands::find_command(&period) else {
        return (StatusCode::NOT_FOUND, "unknown period").into_response();
    };

    let request = match (command.parse)(&q.args()) {
        Ok(r) => r,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match commands::run_request(&request, state.as_ref(), state.renderer.as_ref()).await {
        Ok(card) => Json(card).into_response(),
        Err(e) => {
            log::error!("failed to render {period} card: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

// -----------------------------
// POST /api/command
// Runs one line of chat command text and returns the replies
// -----------------------------
pub async fn post_command(
    State(state): State<SharedState>,
    Json(input): Json<CommandInput>,
) -> impl IntoResponse {
    let mut sink = CollectedReplies::default();
    commands::dispatch(&input.text, state.as_ref(), state.renderer.as_ref(), &mut sink).await;
    Json(CommandResponse { replies: sink.replies })
}
