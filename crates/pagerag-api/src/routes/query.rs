use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/rag", post(ask))
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    #[serde(default)]
    text: String,
    session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    /// The assistant's answer; null when the RAG service had none.
    text: Option<String>,
}

async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest(
            "text of message is required".to_string(),
        ));
    }

    // downstream failure surfaces as a null answer, never as a server error
    let answer = state.client.ask(req.session_id, text).await;
    Ok(Json(AskResponse { text: answer }))
}
