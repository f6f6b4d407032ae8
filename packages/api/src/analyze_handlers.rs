// ABOUTME: HTTP handler for the agent feedback analysis stream
// ABOUTME: Builds the feedback prompt, calls the gateway and streams chunks

use std::convert::Infallible;

use axum::extract::{Json, State};
use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use tracing::{error, info};

use hivemind_ai::feedback::{build_feedback_prompt, chunk_text, CHUNK_CHARS, FEEDBACK_MAX_TOKENS};
use hivemind_ai::ContentPart;
use hivemind_profiles::AgentProfile;

use crate::sse::{create_sse_response, done_event, error_event, json_event};
use crate::state::CompanionState;

/// POST /api/analyze-agent - stream AI feedback for a profile.
///
/// The stream carries `{"chunk": ...}` events and always terminates with
/// exactly one `[DONE]` sentinel; failures surface as a single
/// `{"error": ...}` event first.
pub async fn analyze_agent(
    State(state): State<CompanionState>,
    Json(mut profile): Json<AgentProfile>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Analyzing agent profile: {}", profile.username);

    let stream = async_stream::stream! {
        if !state.ai.is_configured() {
            yield Ok(error_event("AI model unavailable"));
            yield Ok(done_event());
            return;
        }

        profile.resolve_age();

        let dataset_summary = state.dataset.read().await.summary.clone();
        let prompt = build_feedback_prompt(&profile, &dataset_summary);

        match state
            .ai
            .chat_json(vec![ContentPart::text(prompt)], FEEDBACK_MAX_TOKENS)
            .await
        {
            Ok(text) => {
                for chunk in chunk_text(&text, CHUNK_CHARS) {
                    yield Ok(json_event(&serde_json::json!({ "chunk": chunk })));
                }
                yield Ok(done_event());
            }
            Err(err) => {
                error!("AI Error: {}", err);
                yield Ok(error_event(&err.to_string()));
                yield Ok(done_event());
            }
        }
    };

    create_sse_response(stream)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use hivemind_ai::GroqService;

    use crate::state::CompanionState;

    fn state_with(ai: GroqService) -> CompanionState {
        let dir = tempfile::tempdir().unwrap();
        CompanionState::new(dir.path().join("data.csv"), ai)
    }

    fn analyze_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/analyze-agent")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_streams_error_then_done() {
        let app = crate::create_companion_router(state_with(GroqService::disabled()));
        let (status, body) = body_text(
            app,
            analyze_request(r#"{"username": "ada", "location": "Berlin"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data: {"error":"AI model unavailable"}"#));
        assert!(body.ends_with("data: [DONE]\n\n"));
        assert_eq!(body.matches("[DONE]").count(), 1);
    }

    #[tokio::test]
    async fn test_successful_analysis_streams_chunks() {
        let server = MockServer::start().await;
        let long_reply = serde_json::json!({
            "message": "m".repeat(300),
            "milestones": []
        })
        .to_string();
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": long_reply}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ai = GroqService::with_api_key("test-key".to_string()).with_base_url(server.uri());
        let app = crate::create_companion_router(state_with(ai));
        let (status, body) = body_text(
            app,
            analyze_request(r#"{"username": "ada", "location": "Berlin"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.matches(r#"data: {"chunk":"#).count() >= 2, "200-char chunks");
        assert!(body.ends_with("data: [DONE]\n\n"));
    }

    #[tokio::test]
    async fn test_gateway_failure_streams_error_then_done() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let ai = GroqService::with_api_key("test-key".to_string()).with_base_url(server.uri());
        let app = crate::create_companion_router(state_with(ai));
        let (_, body) = body_text(
            app,
            analyze_request(r#"{"username": "ada", "location": "Berlin"}"#),
        )
        .await;

        assert!(body.contains(r#"{"error":"#));
        assert_eq!(body.matches("[DONE]").count(), 1);
    }
}
