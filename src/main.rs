use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matic_admin::api::HttpBackend;
use matic_admin::config::{Cli, Config};
use matic_admin::routes;
use matic_admin::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    let backend = HttpBackend::new(&config.backend.base_url)?;
    tracing::info!("Backend: {}", backend.base_url());

    let state = AppState::new(config.clone(), Arc::new(backend));
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!(
        "Listening on http://{}{}",
        addr,
        config.console.link("/admin")
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
