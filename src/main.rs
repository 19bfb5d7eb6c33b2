use pws_dashboard::{AppConfig, web};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        environment = %config.environment,
        station = %config.station_id,
        "Starting PWS dashboard backend"
    );

    web::run(config).await
}
