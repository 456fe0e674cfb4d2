use anyhow::Context;
use page_route::{
    configuration::get_configuration,
    startup::{run, AppState},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration.")?;
    let _guard = telemetry::init(&configuration.logger);

    let state = AppState::build(&configuration).context("Failed to build application state.")?;
    let address = configuration.application.address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    run(listener, state).await?;
    Ok(())
}
