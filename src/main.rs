//! tickerchat - HTTP Server Entry Point
//!
//! Starts the HTTP server that relays chat messages to the crypto agent.

use tickerchat::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickerchat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env if present; the file is optional
    let _ = dotenvy::dotenv();

    // Load configuration; a missing GEMINI_API_KEY aborts startup here
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    // Start HTTP server
    api::serve(config).await?;

    Ok(())
}
