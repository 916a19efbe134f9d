//! Binary entry point for the clima gateway.
//!
//! Reads the provider credential from the environment, wires the client
//! into the router and serves HTTP on the fixed port.

use clima_core::config::{Config, LISTEN_PORT};
use clima_core::provider::openweather::OpenWeatherClient;
use clima_server::routes;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let config = Config::from_env();
    if config.has_placeholder_key() {
        log::warn!("API_KEY is not set; weather and geocoding calls will fail with an authentication error");
    }

    let client = OpenWeatherClient::new(config.api_key);
    let app = routes::create_router(Arc::new(client));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", LISTEN_PORT)).await?;
    log::info!("{} listening on port {}", routes::SERVICE_NAME, LISTEN_PORT);

    axum::serve(listener, app).await?;

    Ok(())
}
