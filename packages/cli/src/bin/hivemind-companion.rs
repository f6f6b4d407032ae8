// ABOUTME: Entry point for the companion (feedback) service
// ABOUTME: Initializes tracing and runs the server loop

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    hivemind_cli::run_companion().await
}
