use order_bot::config::BotConfig;
use order_bot::console;
use order_bot::lifecycle::{setup_tracing, OrderSystem};
use tokio::io::BufReader;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    let dotenv = dotenvy::dotenv();
    setup_tracing();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let config = BotConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    info!(storage = ?config.storage, "Configuration loaded");

    let system = OrderSystem::start(&config).await.map_err(|e| {
        error!(error = %e, "Startup failed");
        e.to_string()
    })?;
    info!("Bot ready, reading events from stdin");

    let stdin = BufReader::new(tokio::io::stdin());
    let served = console::run(system.handler.clone(), stdin, tokio::io::stdout()).await;
    let shutdown = system.shutdown().await;
    served.map_err(|e| e.to_string())?;
    shutdown
}
