// --- Selección de ramos - servidor API ---

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xuanke::{run_server, AppConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    run_server(config).await
}
