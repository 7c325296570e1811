//! Entry point for the `recipebox-gateway` HTTP server.

use recipebox_gateway::{create_router, AppState, GatewayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match GatewayConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let state = match AppState::from_config(&config).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialise state");
            std::process::exit(1);
        }
    };
    let app = create_router(state, &config.resource_prefix);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.listen_addr,
        prefix = %config.resource_prefix,
        users = config.users.len(),
        "recipebox-gateway listening"
    );

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
