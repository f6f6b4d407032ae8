// ABOUTME: Health check and dataset upload handlers for the companion service
// ABOUTME: Upload persists the file, reloads the table and returns the new summary

use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use hivemind_dataset::DatasetState;

use crate::state::CompanionState;

/// GET /health - service liveness plus gateway readiness.
pub async fn health_check(State(state): State<CompanionState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_ready": state.ai.is_configured(),
    }))
}

/// POST /api/upload-dataset - replace the dataset file and reload it.
///
/// Rejections (wrong extension, unreadable upload) are structured
/// `{"error": ...}` bodies, not HTTP errors.
pub async fn upload_dataset(
    State(state): State<CompanionState>,
    multipart: Multipart,
) -> Json<Value> {
    match receive_dataset(&state, multipart).await {
        Ok((filename, stats)) => Json(json!({
            "message": format!("File uploaded successfully: {}", filename),
            "stats": stats,
        })),
        Err(message) => {
            warn!("Dataset upload rejected: {}", message);
            Json(json!({ "error": message }))
        }
    }
}

async fn receive_dataset(
    state: &CompanionState,
    mut multipart: Multipart,
) -> Result<(String, String), String> {
    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".csv") {
            return Err("Invalid file format. Please upload .csv".to_string());
        }

        let bytes = field.bytes().await.map_err(|e| e.to_string())?;
        tokio::fs::write(&state.dataset_path, &bytes)
            .await
            .map_err(|e| e.to_string())?;

        // Reload so the new table and summary are visible immediately.
        let reloaded = DatasetState::load(&state.dataset_path);
        let stats = reloaded.summary.clone();
        *state.dataset.write().await = reloaded;

        info!("Dataset replaced via upload: {}", filename);
        return Ok((filename, stats));
    }

    Err("No file field in upload".to_string())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use hivemind_ai::GroqService;

    use crate::state::CompanionState;

    const BOUNDARY: &str = "test-boundary";

    fn state() -> CompanionState {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        // Keep the tempdir alive for the test by leaking it.
        std::mem::forget(dir);
        CompanionState::new(path, GroqService::disabled())
    }

    fn multipart_body(filename: &str, content: &str) -> Body {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
             Content-Type: text/csv\r\n\r\n{c}\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = filename,
            c = content
        );
        Body::from(body)
    }

    fn upload_request(filename: &str, content: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload-dataset")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(multipart_body(filename, content))
            .unwrap()
    }

    async fn json_response(
        app: axum::Router,
        request: Request<Body>,
    ) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_reports_model_readiness() {
        let app = crate::create_companion_router(state());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = json_response(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model_ready"], false);
    }

    #[tokio::test]
    async fn test_upload_rejects_wrong_extension_without_http_error() {
        let app = crate::create_companion_router(state());
        let (status, body) = json_response(app, upload_request("data.sav", "junk")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "Invalid file format. Please upload .csv");
    }

    #[tokio::test]
    async fn test_upload_replaces_dataset_and_returns_stats() {
        let state = state();
        let app = crate::create_companion_router(state.clone());
        let (status, body) =
            json_response(app, upload_request("survey.csv", "age\n30\n50")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "File uploaded successfully: survey.csv");
        let stats = body["stats"].as_str().unwrap();
        assert!(stats.contains("Total Records: 2"));
        assert!(stats.contains("Average Age: 40.0"));

        let loaded = state.dataset.read().await;
        assert_eq!(loaded.table.len(), 2);
    }
}
