// ABOUTME: HTTP handler for proof-of-completion evaluation
// ABOUTME: Validates form input strictly before any gateway call

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use hivemind_proof::ProofTask;

use crate::state::ProvementState;

#[derive(Debug, Deserialize)]
pub struct EvaluateForm {
    /// Task object as a JSON string.
    pub task: String,
    /// JSON array of public proof image URLs.
    pub image_urls: String,
    /// Optional user explanation / notes.
    #[serde(default)]
    pub user_text: Option<String>,
}

/// POST /evaluate - judge whether a task is completed.
///
/// Input problems are client errors reported before any gateway call;
/// evaluation itself never fails (negative judgments carry the reason).
pub async fn evaluate(
    State(state): State<ProvementState>,
    Form(form): Form<EvaluateForm>,
) -> Response {
    let task: ProofTask = match serde_json::from_str(&form.task) {
        Ok(task) => task,
        Err(err) => return bad_request(format!("Invalid task JSON: {}", err)),
    };

    let urls: serde_json::Value = match serde_json::from_str(&form.image_urls) {
        Ok(urls) => urls,
        Err(err) => return bad_request(format!("Invalid image_urls JSON: {}", err)),
    };

    let Some(entries) = urls.as_array().filter(|entries| !entries.is_empty()) else {
        return bad_request("image_urls must be a non-empty JSON array of URLs.".to_string());
    };

    let normalized: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .filter(|url| url.starts_with("http"))
        .map(str::to_string)
        .collect();

    if normalized.is_empty() {
        return bad_request(
            "image_urls must contain at least one valid URL starting with http or https."
                .to_string(),
        );
    }

    info!(
        "Evaluating task {} with {} image(s)",
        task.id,
        normalized.len()
    );

    let judgment = state
        .evaluator
        .evaluate(&task, &normalized, form.user_text.as_deref())
        .await;

    Json(judgment).into_response()
}

fn bad_request(detail: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
}
