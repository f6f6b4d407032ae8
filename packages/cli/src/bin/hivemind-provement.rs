// ABOUTME: Entry point for the provement (proof evaluation) service
// ABOUTME: Fails fast at startup when the gateway API key is missing

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    hivemind_cli::run_provement().await
}
