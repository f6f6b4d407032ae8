// ABOUTME: HTTP handler streaming derived milestones over SSE
// ABOUTME: One event per milestone, then the bit vector, then the sentinel

use std::convert::Infallible;

use axum::extract::Json;
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use serde::Deserialize;

use hivemind_milestones::{bit_vector, compute_milestones, Feedback};

use crate::sse::{create_sse_response, done_event, json_event};

#[derive(Debug, Deserialize)]
pub struct MilestoneRequest {
    #[serde(default)]
    pub feedback: Feedback,
}

/// POST /api/milestones/stream - stream milestone derivation as SSE events.
///
/// Emits one `{"milestone": ...}` event per derived milestone in fixed
/// order, then `{"bit_vector": ...}`, then `[DONE]`.
pub async fn milestones_stream(
    Json(request): Json<MilestoneRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let milestones = compute_milestones(&request.feedback);

    let stream = async_stream::stream! {
        for milestone in &milestones {
            yield Ok(json_event(&serde_json::json!({ "milestone": milestone })));
        }
        yield Ok(json_event(&serde_json::json!({ "bit_vector": bit_vector(&milestones) })));
        yield Ok(done_event());
    };

    create_sse_response(stream)
}
