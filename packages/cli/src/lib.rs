// ABOUTME: Startup wiring for the companion and provement services
// ABOUTME: Env loading, CORS, state construction and the serve loop

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub mod config;

use config::{Config, ConfigError};
use hivemind_ai::GroqService;
use hivemind_api::{
    create_companion_router, create_provement_router, CompanionState, ProvementState,
};
use hivemind_proof::ProofEvaluator;

const COMPANION_DEFAULT_PORT: u16 = 8000;
const PROVEMENT_DEFAULT_PORT: u16 = 8001;

/// Run the companion (feedback) service.
///
/// A missing API key degrades AI features instead of refusing to start; the
/// health endpoint reports readiness.
pub async fn run_companion() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env(COMPANION_DEFAULT_PORT)?;
    let ai = GroqService::new();
    if !ai.is_configured() {
        warn!("GROQ_API_KEY not set; feedback requests will return error events");
    }

    let state = CompanionState::new(config.dataset_path.clone(), ai);
    let app = create_companion_router(state).layer(cors_layer(&config.cors_origin)?);

    serve(app, config.port, "companion").await
}

/// Run the provement (proof evaluation) service.
///
/// Refuses to start without an API key.
pub async fn run_provement() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env(PROVEMENT_DEFAULT_PORT)?;
    let ai = GroqService::new();
    if !ai.is_configured() {
        return Err(Box::new(ConfigError::MissingApiKey));
    }

    let state = ProvementState::new(ProofEvaluator::new(ai));
    let app = create_provement_router(state).layer(cors_layer(&config.cors_origin)?);

    serve(app, config.port, "provement").await
}

fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Ok(if origin == "*" {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origin.parse::<HeaderValue>()?)
    })
}

async fn serve(
    app: axum::Router,
    port: u16,
    service: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("{} service listening on {}", service, addr);
    axum::serve(listener, app).await?;
    Ok(())
}
