use pagerag_common::config::{RagConfig, SETTINGS};
use pagerag_common::telemetry;

mod error;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = RagConfig::from_env()?;
    SETTINGS.install(config.clone())?;
    tracing::info!("Starting pagerag API server");

    let app_state = state::AppState::new(&config)?;
    let app = routes::create_router(app_state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
