// POST /api/classify — classify text with the keyword taxonomy.
//
// Body: {"text": "<string>" | ["phrase", ...], "explain": bool}
// Non-string array elements are ignored. Any other `text` shape is a 400.
//
// GET /api/taxonomy — the active taxonomy in file format.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use crate::topics::input::ClassificationInput;
use crate::web::{api_error, AppState};

/// POST /api/classify — return the topic label (and optionally the tally).
pub async fn classify(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let text = body.get("text").unwrap_or(&Value::Null);
    let input = match ClassificationInput::from_json(text) {
        Ok(input) => input,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let explain = body
        .get("explain")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let tally = state.classifier.tally(&input);
    let topic = tally.label();
    tracing::debug!(topic = %topic, explain, "Classified request");

    if explain {
        Json(serde_json::json!({ "topic": topic, "tally": tally })).into_response()
    } else {
        Json(serde_json::json!({ "topic": topic })).into_response()
    }
}

/// GET /api/taxonomy — list topics and their normalized keywords.
pub async fn get_taxonomy(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.classifier.taxonomy().entries())
}
