// ABOUTME: Reusable Server-Sent Events (SSE) infrastructure
// ABOUTME: Event framing helpers and the terminal done sentinel

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;

/// Literal payload of the terminal event closing every stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Helper to create an SSE response with standard keep-alive settings.
pub fn create_sse_response<S>(stream: S) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: Stream<Item = Result<Event, Infallible>> + Send + 'static,
{
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Helper to create a data event from JSON-serializable content.
pub fn json_event<T: serde::Serialize>(data: &T) -> Event {
    Event::default().data(serde_json::to_string(data).unwrap_or_default())
}

/// Helper to create an error data event.
pub fn error_event(message: &str) -> Event {
    json_event(&serde_json::json!({ "error": message }))
}

/// The terminal event; every stream ends with exactly one of these.
pub fn done_event() -> Event {
    Event::default().data(DONE_SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_event_frames_payload() {
        let event = json_event(&serde_json::json!({"chunk": "abc"}));
        // Event's Debug output includes the framed data payload.
        assert!(format!("{:?}", event).contains(r#"chunk"#));
    }

    #[test]
    fn test_done_event_is_sentinel() {
        assert!(format!("{:?}", done_event()).contains("[DONE]"));
    }
}
