//! API server binary entry point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kbatch_api_server=info,kbatch_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Get bind address from environment or use default
    let addr = std::env::var("KBATCH_SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    // Start server
    tracing::info!("Starting sentence batching API server");
    kbatch_api_server::start_server(&addr).await?;

    Ok(())
}
