// Verso & Paz - devotional companion app core
// Entry point for the headless daemon

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use versopaz::commerce::PaymentClient;
use versopaz::services::LogNotifier;
use versopaz::App;

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VERSOPAZ_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".versopaz")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "versopaz=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Verso & Paz");

    let app = App::open(&data_dir(), Arc::new(LogNotifier), PaymentClient::from_env()).await?;
    app.start().await?;

    let devotional = app.content.daily_devotional();
    let verse = app.content.daily_verse();
    tracing::info!("Devotional of the day: {}", devotional.theme);
    tracing::info!("Verse of the day: {} ({})", verse.text, verse.reference);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    app.shutdown().await?;

    Ok(())
}
