//! REST endpoint handlers.
//!
//! Request bodies are read as raw bytes and parsed leniently so that a bad
//! or missing `user_id` always produces the `{error}` shape, whatever else
//! the client sent.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use questionnaire::{AnswerInput, QuestionnaireError};
use serde_json::{Value, json};

use crate::orchestrator::{AnswerReply, BartenderService};

pub type AppState = Arc<BartenderService>;

fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn user_id(body: &Value) -> &str {
    body.get("user_id").and_then(Value::as_str).unwrap_or_default()
}

/// Whatever the client sent as `answer`, in recordable form.
fn answer_input(body: &Value) -> AnswerInput {
    let text = |value: &Value| match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    match body.get("answer") {
        Some(Value::Array(items)) => AnswerInput::Multiple(items.iter().map(text).collect()),
        Some(value) => AnswerInput::Single(text(value)),
        None => AnswerInput::Single(String::new()),
    }
}

/// Whether a sent `enable_speech` value turns speech on. Anything empty,
/// zero, false or missing turns it off.
fn speech_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(enabled) => *enabled,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for AnswerReply {
    fn into_response(self) -> Response {
        match self {
            AnswerReply::Banter(response) | AnswerReply::Warning(response) => {
                (StatusCode::OK, Json(json!({ "response": response }))).into_response()
            }
            AnswerReply::Recommended {
                primary,
                vendor,
                response,
            } => (
                StatusCode::OK,
                Json(json!({
                    "drink": primary,
                    "systembolaget_drink": vendor,
                    "response": response,
                })),
            )
                .into_response(),
            AnswerReply::Rejected(response) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "response": response }))).into_response()
            }
        }
    }
}

fn reject(e: QuestionnaireError) -> Response {
    error_response(StatusCode::BAD_REQUEST, e.to_string())
}

/// GET /api/start
pub async fn start(State(service): State<AppState>) -> Response {
    let user_id = service.start();
    Json(json!({ "user_id": user_id, "enable_speech": true })).into_response()
}

/// POST /api/toggle-speech
pub async fn toggle_speech(State(service): State<AppState>, body: Bytes) -> Response {
    let body = parse_body(&body);
    let sent = body.get("enable_speech").cloned().unwrap_or(Value::Null);

    // The reply echoes the value as sent.
    match service.toggle_speech(user_id(&body), speech_flag(&sent)) {
        Ok(()) => Json(json!({
            "status": "Speech toggle updated successfully!",
            "enable_speech": sent,
        }))
        .into_response(),
        Err(e) => reject(e),
    }
}

/// GET /api/question?user_id=
pub async fn question(
    State(service): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let id = params.get("user_id").map(String::as_str).unwrap_or_default();
    match service.question(id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => reject(e),
    }
}

/// POST /api/answer
pub async fn answer(State(service): State<AppState>, body: Bytes) -> Response {
    let body = parse_body(&body);
    match service.answer(user_id(&body), answer_input(&body)).await {
        Ok(reply) => reply.into_response(),
        Err(e) => reject(e),
    }
}

/// POST /api/reset
pub async fn reset(State(service): State<AppState>, body: Bytes) -> Response {
    let body = parse_body(&body);
    match service.reset(user_id(&body)) {
        Ok(()) => Json(json!({ "status": "Session reset successfully!" })).into_response(),
        Err(e) => reject(e),
    }
}

/// POST /api/close
pub async fn close(State(service): State<AppState>, body: Bytes) -> Response {
    let body = parse_body(&body);
    match service.close(user_id(&body)) {
        Ok(()) => Json(json!({ "status": "Session closed successfully!" })).into_response(),
        Err(e) => reject(e),
    }
}

/// GET /health
pub async fn health(State(service): State<AppState>) -> Response {
    let health = service.health();
    Json(json!({
        "status": "ok",
        "sessions": health.sessions,
        "primary_items": health.primary_items,
        "vendor_items": health.vendor_items,
    }))
    .into_response()
}
