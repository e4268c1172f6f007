use up10_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (_state, router) = up10_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    up10_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
