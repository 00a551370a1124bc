use football_academy::api::routes::create_routes;
use football_academy::config::{AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    let db = DatabaseConfig::from_env()?.create_pool_and_migrate().await?;

    let app = create_routes(db, &config);

    let listener = TcpListener::bind(config.server_address()).await?;
    info!(
        "Academy server starting on http://{}",
        config.server_address()
    );
    info!("Health check available at /health");

    axum::serve(listener, app).await?;

    Ok(())
}
