use sleep_log_backend::{config::AppConfig, create_router, initialize_backend, logging::init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let app_state = initialize_backend(&config);
    let app = create_router(app_state, config.server.cors_origin.as_deref())?;

    // Start the server
    let addr = config.socket_addr()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
